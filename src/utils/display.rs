use crate::models::player::Player;
use crate::models::region::{RegionGroup, RegionGroups};
use crate::services::region_service::Renderer;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    pub fn format_player_table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(
            headers.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
        ));

        for row in rows {
            table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
        }

        table.to_string()
    }

    pub fn player_row(&self, player: &Player) -> Vec<String> {
        vec![
            player.number.map(|n| format!("#{n}")).unwrap_or_default(),
            player.full_name(),
            player.position.clone().unwrap_or_default(),
            player.team_abbrev.clone(),
            player.hometown(),
        ]
    }

    pub fn format_region(&self, group: &RegionGroup) -> String {
        let count = group.players.len();
        let header = self.format_header(&format!(
            "{} ({} {})",
            group.region,
            count,
            plural(count, "player")
        ));

        let headers = &["#", "Name", "Pos", "Team", "Hometown"];
        let rows: Vec<Vec<String>> = group.players.iter().map(|p| self.player_row(p)).collect();

        format!("{}\n{}", header, self.format_player_table(headers, &rows))
    }

    pub fn format_summary(&self, groups: &RegionGroups) -> String {
        let players: usize = groups.iter().map(|g| g.players.len()).sum();
        format!(
            "{} {} from {} {}",
            players,
            plural(players, "player"),
            groups.len(),
            plural(groups.len(), "region")
        )
    }

    pub fn format_groups(&self, groups: &RegionGroups) -> String {
        if groups.is_empty() {
            return "No games scheduled today.".to_string();
        }

        let mut output: Vec<String> = groups.iter().map(|g| self.format_region(g)).collect();
        output.push(format!("\n{}", self.format_summary(groups).bold()));
        output.join("\n")
    }

    pub fn format_error(&self, message: &str) -> String {
        format!(
            "{} {}\nType 'retry' to try again.",
            "Error loading player data:".red().bold(),
            message
        )
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints load cycles to stdout.
#[derive(Default)]
pub struct TerminalRenderer {
    display: DisplayFormatter,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TerminalRenderer {
    fn show_loading(&mut self) {
        println!("{}", "Loading player data...".dimmed());
    }

    fn render(&mut self, groups: &RegionGroups) {
        println!("{}", self.display.format_groups(groups));
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{}", self.display.format_error(message));
    }
}
