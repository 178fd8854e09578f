//! Caller-facing modal configuration and derived dismissal permissions

use crate::config::ModalConfig;

/// Window size presets, resolved against the screen at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    /// Compact dialog for short messages
    #[default]
    Regular,
    /// Roomier dialog for forms
    Medium,
    /// Near full-screen dialog for dense content
    Large,
}

impl ModalSize {
    /// Screen percentages (width, height) this preset resolves to
    pub fn percentages(&self) -> (u16, u16) {
        match self {
            ModalSize::Regular => (50, 40),
            ModalSize::Medium => (65, 55),
            ModalSize::Large => (80, 75),
        }
    }

    /// Convert to string for logging and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalSize::Regular => "regular",
            ModalSize::Medium => "medium",
            ModalSize::Large => "large",
        }
    }

    /// Parse a config-file name, None for unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "regular" => Some(ModalSize::Regular),
            "medium" => Some(ModalSize::Medium),
            "large" => Some(ModalSize::Large),
            _ => None,
        }
    }
}

/// A user action that may request dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    /// The close affordance in the title bar
    Button,
    /// The Escape key
    Esc,
    /// A click on the overlay scrim outside the window
    Overlay,
}

impl CloseTrigger {
    const ALL: [CloseTrigger; 3] = [CloseTrigger::Button, CloseTrigger::Esc, CloseTrigger::Overlay];

    fn bit(&self) -> u8 {
        match self {
            CloseTrigger::Button => 0b001,
            CloseTrigger::Esc => 0b010,
            CloseTrigger::Overlay => 0b100,
        }
    }

    /// Convert to string for logging and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseTrigger::Button => "button",
            CloseTrigger::Esc => "esc",
            CloseTrigger::Overlay => "overlay",
        }
    }

    /// Parse a config-file name, None for unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "button" => Some(CloseTrigger::Button),
            "esc" => Some(CloseTrigger::Esc),
            "overlay" => Some(CloseTrigger::Overlay),
            _ => None,
        }
    }
}

/// Subset of close triggers a modal honors
///
/// Membership alone does not permit dismissal; `allow_close` on the
/// options gates every trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseTriggerSet(u8);

impl CloseTriggerSet {
    /// The set honoring no triggers
    pub const EMPTY: Self = Self(0);

    /// Set containing a single trigger
    pub fn single(trigger: CloseTrigger) -> Self {
        Self(trigger.bit())
    }

    /// Set containing the given triggers
    pub fn from_triggers(triggers: &[CloseTrigger]) -> Self {
        triggers.iter().fold(Self::EMPTY, |set, t| set.with(*t))
    }

    /// Copy of this set with the trigger added
    pub fn with(self, trigger: CloseTrigger) -> Self {
        Self(self.0 | trigger.bit())
    }

    /// Copy of this set with the trigger removed
    pub fn without(self, trigger: CloseTrigger) -> Self {
        Self(self.0 & !trigger.bit())
    }

    /// Whether the trigger is a member
    pub fn contains(&self, trigger: CloseTrigger) -> bool {
        self.0 & trigger.bit() != 0
    }

    /// Whether no trigger is a member
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in declaration order
    pub fn iter(&self) -> impl Iterator<Item = CloseTrigger> + '_ {
        CloseTrigger::ALL.into_iter().filter(|t| self.contains(*t))
    }
}

impl Default for CloseTriggerSet {
    fn default() -> Self {
        Self::single(CloseTrigger::Button)
    }
}

/// Caller-facing modal configuration
///
/// `is_open` is the single source of truth for whether the modal subtree
/// exists in the rendered frame; everything else shapes presentation and
/// dismissal policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalOptions {
    /// Opaque correlation token carried on lifecycle notifications
    pub modal_id: Option<String>,
    /// Whether the modal is visible
    pub is_open: bool,
    /// Title text for the title bar
    pub title: Option<String>,
    /// Window size preset
    pub size: ModalSize,
    /// Master switch for dismissal; false ignores every trigger
    pub allow_close: bool,
    /// Whether a scrim dims the view behind the window
    pub has_overlay: bool,
    /// Triggers honored when `allow_close` is true
    pub close_on: CloseTriggerSet,
    /// Whether the body scrolls when content overflows
    pub can_scroll_body: bool,
    /// Whether the body gets inner padding
    pub has_body_padding: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            modal_id: None,
            is_open: false,
            title: None,
            size: ModalSize::Regular,
            allow_close: true,
            has_overlay: true,
            close_on: CloseTriggerSet::default(),
            can_scroll_body: true,
            has_body_padding: true,
        }
    }
}

impl ModalOptions {
    /// Options with the documented defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options seeded from the `[modal]` config section
    ///
    /// Unknown size or trigger names fall back to the defaults so a stale
    /// config file cannot make construction fail.
    pub fn from_defaults(defaults: &ModalConfig) -> Self {
        let triggers: Vec<CloseTrigger> = defaults
            .close_on
            .iter()
            .filter_map(|name| CloseTrigger::from_name(name))
            .collect();

        Self {
            size: ModalSize::from_name(&defaults.default_size).unwrap_or_default(),
            allow_close: defaults.allow_close,
            has_overlay: defaults.has_overlay,
            close_on: CloseTriggerSet::from_triggers(&triggers),
            can_scroll_body: defaults.can_scroll_body,
            has_body_padding: defaults.has_body_padding,
            ..Self::default()
        }
    }

    /// Set the correlation token
    pub fn modal_id<S: Into<String>>(mut self, id: S) -> Self {
        self.modal_id = Some(id.into());
        self
    }

    /// Set initial visibility
    pub fn open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    /// Set the title text
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the size preset
    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    /// Set the dismissal master switch
    pub fn allow_close(mut self, allow: bool) -> Self {
        self.allow_close = allow;
        self
    }

    /// Set scrim presence
    pub fn has_overlay(mut self, overlay: bool) -> Self {
        self.has_overlay = overlay;
        self
    }

    /// Replace the honored trigger set
    pub fn close_on(mut self, triggers: CloseTriggerSet) -> Self {
        self.close_on = triggers;
        self
    }

    /// Set body scrolling
    pub fn can_scroll_body(mut self, scroll: bool) -> Self {
        self.can_scroll_body = scroll;
        self
    }

    /// Set body padding
    pub fn has_body_padding(mut self, padding: bool) -> Self {
        self.has_body_padding = padding;
        self
    }
}

/// Dismissal permissions derived from the current options
///
/// Computed fresh on every evaluation; nothing here is cached across
/// option changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosePolicy {
    /// Close affordance dismisses
    pub close_on_button: bool,
    /// Escape key dismisses
    pub close_on_esc: bool,
    /// Overlay click dismisses
    pub close_on_overlay: bool,
}

impl ClosePolicy {
    /// Derive the permissions for the given options
    pub fn evaluate(options: &ModalOptions) -> Self {
        let permitted =
            |trigger: CloseTrigger| options.allow_close && options.close_on.contains(trigger);

        Self {
            close_on_button: permitted(CloseTrigger::Button),
            close_on_esc: permitted(CloseTrigger::Esc),
            close_on_overlay: permitted(CloseTrigger::Overlay),
        }
    }

    /// Whether the given trigger may dismiss
    pub fn permits(&self, trigger: CloseTrigger) -> bool {
        match trigger {
            CloseTrigger::Button => self.close_on_button,
            CloseTrigger::Esc => self.close_on_esc,
            CloseTrigger::Overlay => self.close_on_overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_documented_defaults() {
        let options = ModalOptions::default();
        assert_eq!(options.modal_id, None);
        assert!(!options.is_open);
        assert_eq!(options.title, None);
        assert_eq!(options.size, ModalSize::Regular);
        assert!(options.allow_close);
        assert!(options.has_overlay);
        assert!(options.close_on.contains(CloseTrigger::Button));
        assert!(!options.close_on.contains(CloseTrigger::Esc));
        assert!(!options.close_on.contains(CloseTrigger::Overlay));
        assert!(options.can_scroll_body);
        assert!(options.has_body_padding);
    }

    #[test]
    fn trigger_set_membership() {
        let set = CloseTriggerSet::EMPTY
            .with(CloseTrigger::Esc)
            .with(CloseTrigger::Overlay);
        assert!(!set.contains(CloseTrigger::Button));
        assert!(set.contains(CloseTrigger::Esc));
        assert!(set.contains(CloseTrigger::Overlay));

        let set = set.without(CloseTrigger::Esc);
        assert!(!set.contains(CloseTrigger::Esc));
        assert!(set.contains(CloseTrigger::Overlay));

        assert!(CloseTriggerSet::EMPTY.is_empty());
        assert!(!set.is_empty());
    }

    #[test]
    fn trigger_set_iterates_members_in_order() {
        let set = CloseTriggerSet::from_triggers(&[CloseTrigger::Overlay, CloseTrigger::Button]);
        let members: Vec<CloseTrigger> = set.iter().collect();
        assert_eq!(members, vec![CloseTrigger::Button, CloseTrigger::Overlay]);
    }

    #[test]
    fn allow_close_false_blocks_every_trigger() {
        let options = ModalOptions::new()
            .allow_close(false)
            .close_on(CloseTriggerSet::from_triggers(&[
                CloseTrigger::Button,
                CloseTrigger::Esc,
                CloseTrigger::Overlay,
            ]));

        let policy = ClosePolicy::evaluate(&options);
        assert!(!policy.close_on_button);
        assert!(!policy.close_on_esc);
        assert!(!policy.close_on_overlay);
    }

    #[test]
    fn membership_gates_each_trigger_independently() {
        let options = ModalOptions::new().close_on(CloseTriggerSet::from_triggers(&[
            CloseTrigger::Button,
            CloseTrigger::Esc,
        ]));

        let policy = ClosePolicy::evaluate(&options);
        assert!(policy.permits(CloseTrigger::Button));
        assert!(policy.permits(CloseTrigger::Esc));
        assert!(!policy.permits(CloseTrigger::Overlay));
    }

    #[test]
    fn policy_reflects_option_changes_without_caching() {
        let mut options = ModalOptions::new();
        assert!(ClosePolicy::evaluate(&options).close_on_button);

        options.allow_close = false;
        assert!(!ClosePolicy::evaluate(&options).close_on_button);

        options.allow_close = true;
        options.close_on = CloseTriggerSet::EMPTY;
        assert!(!ClosePolicy::evaluate(&options).close_on_button);
    }

    #[test]
    fn options_from_config_defaults() {
        let mut defaults = crate::config::ModalConfig::default();
        defaults.default_size = "large".to_string();
        defaults.close_on = vec!["esc".to_string(), "overlay".to_string()];
        defaults.has_overlay = false;

        let options = ModalOptions::from_defaults(&defaults);
        assert_eq!(options.size, ModalSize::Large);
        assert!(!options.has_overlay);
        assert!(!options.close_on.contains(CloseTrigger::Button));
        assert!(options.close_on.contains(CloseTrigger::Esc));
        assert!(options.close_on.contains(CloseTrigger::Overlay));
        assert!(!options.is_open);
    }

    #[test]
    fn options_from_config_skips_unknown_names() {
        let mut defaults = crate::config::ModalConfig::default();
        defaults.default_size = "gigantic".to_string();
        defaults.close_on = vec!["button".to_string(), "middle-click".to_string()];

        let options = ModalOptions::from_defaults(&defaults);
        assert_eq!(options.size, ModalSize::Regular);
        assert!(options.close_on.contains(CloseTrigger::Button));
        assert!(!options.close_on.contains(CloseTrigger::Overlay));
    }
}
