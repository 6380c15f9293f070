//! Terminal ANSI - Uses your terminal's native ANSI colors
//! For users who have carefully crafted their terminal theme

pub const THEME: &str = r##"# Terminal ANSI theme for tui-dropdown
# Uses your terminal's native ANSI colors - adapts to your terminal theme!
#
# This theme uses "ansi:X" syntax instead of hex colors:
# - ansi:0-7 = standard colors (black, red, green, yellow, blue, magenta, cyan, white)
# - ansi:8-15 = bright variants
# - ansi:fg = terminal's default foreground
# - ansi:bg = terminal's default background (transparent)

[meta]
name = "Terminal ANSI"
version = 1
author = "tui-dropdown"

[ui]
background = "ansi:bg"
foreground = "ansi:fg"
border = "ansi:8"
border_focused = "ansi:4"
title = "ansi:6"
status_bar = "ansi:8"
muted = "ansi:8"
border_type = "rounded"

[dropdown]
label = "ansi:fg"
placeholder = "ansi:8"
indicator = "ansi:8"
chip_bg = "ansi:8"
chip_fg = "ansi:15"
chip_remove = "ansi:7"
menu_bg = "ansi:bg"
search_icon = "ansi:8"
match_bg = "ansi:2"
match_fg = "ansi:0"
selected_bg = "ansi:10"
selected_fg = "ansi:0"
active_bg = "ansi:8"
active_fg = "ansi:15"

[logs]
error = "ansi:1"
warn = "ansi:3"
info = "ansi:2"
debug = "ansi:8"

[classes.danger]
border = "ansi:1"

[classes.muted]
foreground = "ansi:8"
"##;
