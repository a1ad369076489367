use std::process;

fn main() {
    match html_toc_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("html-toc error: {err:#}");
            process::exit(1);
        }
    }
}
