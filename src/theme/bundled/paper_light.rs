//! Paper Light - White surfaces, gray chrome, green selection
//! The look of a typical web component library, in cells

pub const THEME: &str = r##"# Paper Light theme for tui-dropdown

[meta]
name = "Paper Light"
version = 1
author = "tui-dropdown"

[ui]
background = "#ffffff"
foreground = "#111827"
border = "#e5e7eb"
border_focused = "#3b82f6"
title = "#111827"
status_bar = "#6b7280"
muted = "#9ca3af"
border_type = "rounded"

[dropdown]
label = "#374151"
placeholder = "#6b7280"
indicator = "#9ca3af"
chip_bg = "#f3f4f6"
chip_fg = "#111827"
chip_remove = "#6b7280"
menu_bg = "#ffffff"
search_icon = "#9ca3af"
match_bg = "#bbf7d0"
match_fg = "#111827"
selected_bg = "#dcfce7"
selected_fg = "#111827"
active_bg = "#f0fdf4"
active_fg = "#111827"

[logs]
error = "#dc2626"
warn = "#d97706"
info = "#16a34a"
debug = "#6b7280"

[classes.danger]
border = "#ef4444"

[classes.muted]
foreground = "#6b7280"
"##;
