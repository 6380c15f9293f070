//! Slate Dark - Default theme
//! Slate surfaces, blue focus ring, green selection

pub const THEME: &str = r##"# Slate Dark theme for tui-dropdown

[meta]
name = "Slate Dark"
version = 1
author = "tui-dropdown"

[ui]
background = "#0f172a"
foreground = "#e2e8f0"
border = "#334155"
border_focused = "#60a5fa"
title = "#f8fafc"
status_bar = "#94a3b8"
muted = "#64748b"
border_type = "rounded"

[dropdown]
label = "#cbd5e1"
placeholder = "#64748b"
indicator = "#94a3b8"
chip_bg = "#1e293b"
chip_fg = "#e2e8f0"
chip_remove = "#94a3b8"
menu_bg = "#111827"
search_icon = "#64748b"
match_bg = "#166534"
match_fg = "#f0fdf4"
selected_bg = "#14532d"
selected_fg = "#dcfce7"
active_bg = "#1e293b"
active_fg = "#f8fafc"

[logs]
error = "#f87171"
warn = "#fbbf24"
info = "#4ade80"
debug = "#64748b"

[classes.danger]
border = "#f87171"

[classes.muted]
foreground = "#64748b"
"##;
