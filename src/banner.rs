//! Startup banner.

use console::{style, Term};

const LOGO: &str = r"
 _   _  ___ _____ ____  _   _  ___  ____
| \ | |/ _ \_   _/ ___|| | | |/ _ \|  _ \
|  \| | | | || | \___ \| |_| | | | | |_) |
| |\  | |_| || |  ___) |  _  | |_| |  __/
|_| \_|\___/ |_| |____/|_| |_|\___/|_|
";

/// Clear the terminal (best effort) and print the logo with version info.
pub fn print() {
    let term = Term::stdout();
    if term.is_term() {
        let _ = term.clear_screen();
    }

    println!("{}", style(LOGO).cyan().bold());
    println!(
        "  {} {}   {} {}\n",
        style("version").dim(),
        style(env!("CARGO_PKG_VERSION")).yellow().bold(),
        style("by").dim(),
        style("@notnone").magenta().bold(),
    );
}
