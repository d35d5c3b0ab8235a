//! Print the OpenAPI document as pretty JSON.

use std::process::ExitCode;

use complaints::ApiDoc;
use utoipa::OpenApi;

#[expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "command-line tool writes the document to stdout"
)]
fn main() -> ExitCode {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to serialise OpenAPI document: {err}");
            ExitCode::FAILURE
        }
    }
}
