//! Gallery stories
//!
//! Each story is one configured dropdown. The gallery owns the value
//! (the widget is controlled): `on_change` writes into a shared cell and
//! the app feeds it back through `set_value` after every input event.

use crate::config::DropdownDefaults;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use tui_dropdown::dropdown::render::default_row;
use tui_dropdown::dropdown::{OptionRenderer, PointerListeners, RowState};
use tui_dropdown::{Dropdown, DropdownOption, DropdownProps, DropdownValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Story {
    Basic,
    MultiSelect,
    WithPreselectedValue,
    WithMultiplePreselected,
    Inline,
    NoSearch,
    CustomRenderer,
    NearBottom,
}

impl Story {
    /// Gallery order; `NearBottom` stays last so it sits at the bottom edge
    pub const ALL: [Story; 8] = [
        Story::Basic,
        Story::MultiSelect,
        Story::WithPreselectedValue,
        Story::WithMultiplePreselected,
        Story::Inline,
        Story::NoSearch,
        Story::CustomRenderer,
        Story::NearBottom,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Story::Basic => "basic",
            Story::MultiSelect => "multi-select",
            Story::WithPreselectedValue => "with-preselected-value",
            Story::WithMultiplePreselected => "with-multiple-preselected",
            Story::Inline => "inline",
            Story::NoSearch => "no-search",
            Story::CustomRenderer => "custom-renderer",
            Story::NearBottom => "near-bottom",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.slug().eq_ignore_ascii_case(slug.trim()))
    }

    pub fn description(&self) -> &'static str {
        match self {
            Story::Basic => "Single select with search",
            Story::MultiSelect => "Chips, menu stays open while picking",
            Story::WithPreselectedValue => "Single select starting on Jakarta",
            Story::WithMultiplePreselected => "Multi select starting on two cities",
            Story::Inline => "Menu drawn in place, clipped by its container",
            Story::NoSearch => "No search input; Space/Enter select",
            Story::CustomRenderer => "Rows show the province; closed cities refuse selection",
            Story::NearBottom => "Not enough room below, menu opens upward",
        }
    }

    fn props(&self, defaults: &DropdownDefaults) -> DropdownProps {
        let base = DropdownProps::new(self.slug())
            .max_visible_rows(defaults.max_visible_rows)
            .placement(defaults.placement());

        match self {
            Story::Basic | Story::WithPreselectedValue => base.label("City"),
            Story::MultiSelect | Story::WithMultiplePreselected => {
                base.label("Cities").multiple(true)
            }
            Story::Inline => base.label("City").with_portal(false),
            Story::NoSearch => base.label("City").with_search(false).class_name("muted"),
            Story::CustomRenderer => base.label("City").class_name("danger"),
            Story::NearBottom => base.label("Cities").multiple(true),
        }
    }

    fn initial_value(&self) -> DropdownValue {
        match self {
            Story::WithPreselectedValue => DropdownValue::from("1"),
            Story::WithMultiplePreselected => DropdownValue::from(vec!["1", "2"]),
            Story::MultiSelect | Story::NearBottom => DropdownValue::empty(true),
            _ => DropdownValue::empty(false),
        }
    }

    /// Build the dropdown, wiring `on_change` to the returned value cell
    pub fn build(
        &self,
        options: &[DropdownOption],
        defaults: &DropdownDefaults,
        listeners: &PointerListeners,
    ) -> (Dropdown, Rc<RefCell<DropdownValue>>) {
        let value = self.initial_value();
        let shared = Rc::new(RefCell::new(value.clone()));

        let sink = Rc::clone(&shared);
        let story = self.slug();
        let mut dropdown = Dropdown::new(self.props(defaults), options.to_vec(), value)
            .listeners(listeners.clone())
            .on_change(move |value| {
                tracing::info!("Value changed: {}", value.to_json());
                tracing::debug!(story, "value stored");
                *sink.borrow_mut() = value;
            });

        if *self == Story::CustomRenderer {
            dropdown = dropdown.option_renderer(ProvinceRenderer);
        }

        (dropdown, shared)
    }
}

/// Built-in option list
pub fn cities() -> Vec<DropdownOption> {
    [
        ("1", "Jakarta", "DKI Jakarta"),
        ("2", "Surabaya", "East Java"),
        ("3", "Bandung", "West Java"),
        ("4", "Medan", "North Sumatra"),
        ("5", "Semarang", "Central Java"),
        ("6", "Palembang", "South Sumatra"),
        ("7", "Makassar", "South Sulawesi"),
    ]
    .into_iter()
    .map(|(value, label, province)| {
        let option = DropdownOption::labeled(value, label).with_field("province", province);
        if value == "6" {
            option.with_field("closed", true)
        } else {
            option
        }
    })
    .collect()
}

fn is_closed(option: &DropdownOption) -> bool {
    matches!(option.field("closed"), Some(Value::Bool(true)))
}

/// Rows with a muted province column; closed cities cannot be picked
struct ProvinceRenderer;

impl OptionRenderer for ProvinceRenderer {
    fn render_row(&self, option: &DropdownOption, state: RowState<'_>) -> Line<'static> {
        let theme = state.theme;
        let mut line = default_row(state);

        let province = option.display_text("province");
        if !province.is_empty() {
            line.spans.push(Span::styled(
                format!("  {}", province),
                Style::default().fg(theme.muted),
            ));
        }
        if is_closed(option) {
            line.spans.push(Span::styled(
                "  closed",
                Style::default()
                    .fg(theme.log_warn)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        line
    }

    fn on_activate(&self, option: &DropdownOption, select: &mut dyn FnMut()) {
        if is_closed(option) {
            tracing::warn!("{} is closed, selection refused", option.display_text("label"));
            return;
        }
        select();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tui_dropdown::traits::Interactive;

    fn press(dropdown: &mut Dropdown, code: KeyCode) {
        dropdown.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_slugs_round_trip() {
        for story in Story::ALL {
            assert_eq!(Story::from_slug(story.slug()), Some(story));
        }
        assert_eq!(Story::from_slug(" Near-Bottom "), Some(Story::NearBottom));
        assert_eq!(Story::from_slug("storybook"), None);
    }

    #[test]
    fn test_preselected_stories_start_selected() {
        let listeners = PointerListeners::new();
        let defaults = DropdownDefaults::default();

        let (single, _) =
            Story::WithPreselectedValue.build(&cities(), &defaults, &listeners);
        assert_eq!(single.selected_options()[0].display_text("label"), "Jakarta");

        let (multi, _) =
            Story::WithMultiplePreselected.build(&cities(), &defaults, &listeners);
        let labels: Vec<_> = multi
            .selected_options()
            .iter()
            .map(|o| o.display_text("label"))
            .collect();
        assert_eq!(labels, ["Jakarta", "Surabaya"]);
    }

    #[test]
    fn test_on_change_writes_shared_value() {
        let listeners = PointerListeners::new();
        let (mut dropdown, value) =
            Story::MultiSelect.build(&cities(), &DropdownDefaults::default(), &listeners);

        dropdown.open();
        dropdown.select("3");
        assert_eq!(*value.borrow(), DropdownValue::from(vec!["3"]));
        // Controlled: the widget only changes when the host syncs it back
        assert!(dropdown.value().is_empty());
    }

    #[test]
    fn test_closed_city_is_refused() {
        let listeners = PointerListeners::new();
        let (mut dropdown, value) =
            Story::CustomRenderer.build(&cities(), &DropdownDefaults::default(), &listeners);

        dropdown.open();
        dropdown.set_search("palem");
        press(&mut dropdown, KeyCode::Enter);
        assert!(value.borrow().is_empty());
        assert!(dropdown.is_open());

        dropdown.set_search("medan");
        press(&mut dropdown, KeyCode::Enter);
        assert_eq!(*value.borrow(), DropdownValue::from("4"));
    }

    #[test]
    fn test_stories_share_one_listener_registry() {
        let listeners = PointerListeners::new();
        let defaults = DropdownDefaults::default();
        let (mut a, _) = Story::Basic.build(&cities(), &defaults, &listeners);
        let (mut b, _) = Story::NoSearch.build(&cities(), &defaults, &listeners);

        a.open();
        b.open();
        assert_eq!(listeners.active(), 2);
        a.close();
        b.dismiss_outside();
        assert_eq!(listeners.active(), 0);
    }
}
