use clap::Parser;
use miette::Result;
use cct::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
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
        Commands::Init(args) => cct::cli::commands::init::run(args, &global),
        Commands::Category(cmd) => cct::cli::commands::category::run(cmd, &global),
        Commands::Part(cmd) => cct::cli::commands::part::run(cmd, &global),
        Commands::Import(args) => cct::cli::commands::import::run(args, &global),
        Commands::Extract(args) => cct::cli::commands::extract::run(args, &global),
        Commands::Categorize(args) => cct::cli::commands::categorize::run(args, &global),
        Commands::Check(args) => cct::cli::commands::check::run(args, &global),
        Commands::Build(args) => cct::cli::commands::build::run(args, &global),
        Commands::Bom(args) => cct::cli::commands::bom::run(args, &global),
        Commands::Status(args) => cct::cli::commands::status::run(args, &global),
        Commands::Completions(args) => cct::cli::commands::completions::run(args),
    }
}
