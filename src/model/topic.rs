/// Level separator in topic names.
pub const LEVEL_SEPARATOR: char = '/';

/// Matches exactly one level.
pub const SINGLE_LEVEL_WILDCARD: &str = "*";

/// Matches one or more trailing levels; only valid as the last level.
pub const MULTI_LEVEL_WILDCARD: &str = ">";

/// Returns true if `topic` is covered by the `subscription`.
///
/// A `>` anywhere but the last level is treated literally.
pub fn matches(subscription: &str, topic: &str) -> bool {
    let mut sub_levels = subscription.split(LEVEL_SEPARATOR).peekable();
    let mut topic_levels = topic.split(LEVEL_SEPARATOR);

    while let Some(sub) = sub_levels.next() {
        let is_last = sub_levels.peek().is_none();

        if sub == MULTI_LEVEL_WILDCARD && is_last {
            // needs at least one remaining level
            return topic_levels.next().is_some();
        }

        match topic_levels.next() {
            Some(level) if sub == SINGLE_LEVEL_WILDCARD || sub == level => {}
            _ => return false,
        }
    }

    topic_levels.next().is_none()
}
