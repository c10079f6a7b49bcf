//! flakedeps CLI entrypoint

// The CLI writes its result to stdout and fatal errors to stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

use flakedeps::cli::{self, EXIT_OK};
use flakedeps::{commands, init_tracing};
use miette::Report;

#[tokio::main]
async fn main() {
    let cli = cli::parse();
    init_tracing(&cli.log_level);

    let exit_code = match commands::run(&cli).await {
        Ok(output) => {
            println!("{output}");
            EXIT_OK
        }
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", Report::new(err));
            code
        }
    };
    std::process::exit(exit_code);
}
