use crate::step::Role;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub bar: Color, // Untouched array element / vertex / node
    pub comparing: Color,
    pub swapping: Color,
    pub sorted: Color,
    pub visited: Color,
    pub current: Color,
    pub frontier: Color,
    pub eliminated: Color,
    pub found: Color,
    pub pivot: Color,
    pub range: Color,
    pub edge: Color,
    pub traversed_edge: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    bar: Color::Rgb(59, 130, 246),             // Blue
    comparing: Color::Rgb(245, 158, 11),       // Amber
    swapping: Color::Rgb(239, 68, 68),         // Red
    sorted: Color::Rgb(16, 185, 129),          // Green
    visited: Color::Rgb(16, 185, 129),         // Green
    current: Color::Rgb(245, 158, 11),         // Amber
    frontier: Color::Rgb(139, 92, 246),        // Purple
    eliminated: Color::Rgb(75, 85, 99),        // Dark grey
    found: Color::Rgb(16, 185, 129),           // Green
    pivot: Color::Rgb(239, 68, 68),            // Red
    range: Color::Rgb(250, 204, 21),           // Yellow
    edge: Color::Rgb(107, 114, 128),           // Grey
    traversed_edge: Color::Rgb(239, 68, 68),   // Red
};

impl Theme {
    /// Colour of an element whose highest-priority role is `role`
    pub fn role_color(&self, role: Option<Role>) -> Color {
        match role {
            None => self.bar,
            Some(Role::Comparing) => self.comparing,
            Some(Role::Swapping) => self.swapping,
            Some(Role::Sorted) => self.sorted,
            Some(Role::Visited) => self.visited,
            Some(Role::Current) => self.current,
            Some(Role::Frontier) => self.frontier,
            Some(Role::Eliminated) => self.eliminated,
            Some(Role::Found) => self.found,
            Some(Role::Pivot) => self.pivot,
            Some(Role::Range) => self.range,
        }
    }
}
