// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Enabled telemetry and push-event kinds.
//!
//! A node only forwards the telemetry and push events its [`ActionSet`]
//! enables. The set is persisted as a pipe-delimited string of tokens such
//! as `getMeterEvents|getInfoEvents`, which is also the format inbound
//! messages use to replace it.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between tokens in the persisted and inbound representation.
const TOKEN_SEPARATOR: char = '|';

/// Raw value persisted by the `clearEvents` command.
pub(crate) const CLEAR_EVENTS: &str = "clearEvents";

/// A kind of telemetry or push event that a node can forward.
///
/// # Examples
///
/// ```
/// use plugflow::types::ActionKind;
///
/// assert_eq!(ActionKind::MeterEvents.token(), "getMeterEvents");
/// assert_eq!(ActionKind::from_token("getOnlineEvents"), Some(ActionKind::OnlineEvents));
/// assert_eq!(ActionKind::from_token("getonlineevents"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    /// Poll realtime energy-meter readings every tick.
    MeterEvents,
    /// Poll system info every tick.
    InfoEvents,
    /// Forward relay power-on/power-off push events.
    PowerUpdateEvents,
    /// Forward in-use/not-in-use push events.
    InUseEvents,
    /// Forward device-online/device-offline push events.
    OnlineEvents,
}

impl ActionKind {
    /// All action kinds, in token order.
    pub const ALL: [Self; 5] = [
        Self::MeterEvents,
        Self::InfoEvents,
        Self::PowerUpdateEvents,
        Self::InUseEvents,
        Self::OnlineEvents,
    ];

    /// Returns the literal token used in inbound messages.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::MeterEvents => "getMeterEvents",
            Self::InfoEvents => "getInfoEvents",
            Self::PowerUpdateEvents => "getPowerUpdateEvents",
            Self::InUseEvents => "getInUseEvents",
            Self::OnlineEvents => "getOnlineEvents",
        }
    }

    /// Looks up the action kind for a token.
    ///
    /// Matching is exact and case-sensitive; anything else yields `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The persisted selection of enabled action kinds.
///
/// The set keeps its raw persisted string so that the exact value written by
/// a command survives. Membership is derived from the recognized tokens in
/// that string; anything else in it is ignored. An unset value behaves as the
/// empty set.
///
/// # Examples
///
/// ```
/// use plugflow::types::{ActionKind, ActionSet};
///
/// let set = ActionSet::parse("getMeterEvents|bogus|getInfoEvents");
/// assert_eq!(set.raw(), "getMeterEvents|getInfoEvents");
/// assert!(set.contains(ActionKind::InfoEvents));
/// assert!(!set.contains(ActionKind::OnlineEvents));
///
/// let empty = ActionSet::parse("nothing|here");
/// assert_eq!(empty.raw(), "");
/// assert!(empty.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet {
    raw: String,
}

impl ActionSet {
    /// Creates an empty action set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an action set from a pipe-delimited token list.
    ///
    /// Unrecognized tokens are dropped. Recognized tokens keep their
    /// relative order, duplicates included.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        let raw = list
            .split(TOKEN_SEPARATOR)
            .filter(|token| ActionKind::from_token(token).is_some())
            .collect::<Vec<_>>()
            .join("|");
        Self { raw }
    }

    /// Restores an action set from its persisted value without filtering.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The value the `clearEvents` command persists.
    ///
    /// It holds no recognized token, so nothing is enabled afterwards.
    #[must_use]
    pub fn cleared() -> Self {
        Self::from_raw(CLEAR_EVENTS)
    }

    /// Returns the persisted string.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the given kind is enabled.
    #[must_use]
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.iter().any(|enabled| enabled == kind)
    }

    /// Returns the distinct enabled kinds.
    #[must_use]
    pub fn kinds(&self) -> BTreeSet<ActionKind> {
        self.iter().collect()
    }

    /// Returns `true` if no kind is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Iterates over the recognized tokens in persisted order.
    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.raw
            .split(TOKEN_SEPARATOR)
            .filter_map(ActionKind::from_token)
    }
}

impl FromIterator<ActionKind> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        let raw = iter
            .into_iter()
            .map(|kind| kind.token())
            .collect::<Vec<_>>()
            .join("|");
        Self { raw }
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_for_every_kind() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_token(kind.token()), Some(kind));
        }
    }

    #[test]
    fn parse_drops_unknown_tokens_and_keeps_order() {
        let set = ActionSet::parse("getMeterEvents|bogus|getInfoEvents");
        assert_eq!(set.raw(), "getMeterEvents|getInfoEvents");
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![ActionKind::MeterEvents, ActionKind::InfoEvents]
        );
    }

    #[test]
    fn parse_without_known_tokens_is_empty() {
        for input in ["", "bogus", "getinfoevents", " getInfoEvents", "||", "getInfo"] {
            let set = ActionSet::parse(input);
            assert_eq!(set.raw(), "", "input {input:?}");
            assert!(set.is_empty(), "input {input:?}");
        }
    }

    #[test]
    fn kinds_ignore_order_and_duplicates() {
        let a = ActionSet::parse("getOnlineEvents|getInUseEvents|getOnlineEvents");
        let b = ActionSet::parse("getInUseEvents|getOnlineEvents");

        assert_eq!(a.kinds(), b.kinds());
        assert_eq!(
            a.kinds(),
            BTreeSet::from([ActionKind::InUseEvents, ActionKind::OnlineEvents])
        );
    }

    #[test]
    fn parse_is_idempotent() {
        let once = ActionSet::parse("getPowerUpdateEvents|x|getMeterEvents");
        let twice = ActionSet::parse(once.raw());
        assert_eq!(once, twice);
    }

    #[test]
    fn all_tokens_enable_every_kind() {
        let list = ActionKind::ALL.map(|kind| kind.token()).join("|");
        let set = ActionSet::parse(&list);
        for kind in ActionKind::ALL {
            assert!(set.contains(kind));
        }
    }

    #[test]
    fn cleared_keeps_literal_but_enables_nothing() {
        let set = ActionSet::cleared();
        assert_eq!(set.raw(), "clearEvents");
        assert!(set.is_empty());
        assert!(!set.contains(ActionKind::InfoEvents));
    }

    #[test]
    fn default_is_empty() {
        assert!(ActionSet::new().is_empty());
        assert_eq!(ActionSet::default().raw(), "");
    }

    #[test]
    fn from_iterator_joins_tokens() {
        let set: ActionSet = [ActionKind::InfoEvents, ActionKind::PowerUpdateEvents]
            .into_iter()
            .collect();
        assert_eq!(set.raw(), "getInfoEvents|getPowerUpdateEvents");
    }

    #[test]
    fn serializes_as_plain_string() {
        let set = ActionSet::parse("getMeterEvents");
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            serde_json::json!("getMeterEvents")
        );
        let restored: ActionSet = serde_json::from_str("\"getInUseEvents|junk\"").unwrap();
        assert_eq!(restored.raw(), "getInUseEvents|junk");
        assert!(restored.contains(ActionKind::InUseEvents));
    }
}
