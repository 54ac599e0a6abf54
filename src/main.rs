use clap::Parser;
use miette::Result;
use slopes::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Export(args) => slopes::cli::commands::export::run(args, &global),
        Commands::Inventory(args) => slopes::cli::commands::inventory::run(args, &global),
        Commands::Check(args) => slopes::cli::commands::check::run(args, &global),
        Commands::Parts(args) => slopes::cli::commands::parts::run(args, &global),
        Commands::Completions(args) => slopes::cli::commands::completions::run(args),
    }
}
