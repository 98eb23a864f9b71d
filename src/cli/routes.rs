use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::roles::{Destination, Role};

/// Print the role -> destination routing table.
pub fn run() -> Result<()> {
    println!("{}", "Sign-in routing".bold());

    let mut table = Table::new();
    table.set_header(vec!["Role", "Console", "Page"]);

    for role in Role::ALL {
        let destination = role.destination();
        table.add_row(vec![
            Cell::new(role.title()),
            Cell::new(destination.title()),
            Cell::new(destination.page()),
        ]);
    }
    table.add_row(vec![
        Cell::new("(no sign-in)"),
        Cell::new(Destination::Call.title()),
        Cell::new(Destination::Call.page()),
    ]);

    println!("{table}");
    Ok(())
}
