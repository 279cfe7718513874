use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::core::state::Page;

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.list() {
        io::print_info(overview_line(entry));
    }
    io::print_info(format!("Pages: {}", page_names()));
    io::print_info("Use `help <command>` for details. Press Tab (or ?) to complete commands and their options.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
}

fn overview_line(entry: &CommandEntry) -> String {
    format!("  {:<12} {}", entry.name, entry.description)
}

fn page_names() -> String {
    Page::ALL
        .iter()
        .map(Page::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
