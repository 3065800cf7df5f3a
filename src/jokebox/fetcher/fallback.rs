//! Jokes bundled with the binary, used whenever the joke API cannot answer.

use crate::model::JokeRecord;
use once_cell::sync::Lazy;

enum Text {
    Single(&'static str),
    TwoPart(&'static str, &'static str),
}

const BUNDLED: &[(&str, &str, Text)] = &[
    (
        "fallback-1",
        "misc",
        Text::Single(
            "Why do scuba divers always fall backwards off the boat? Because if they fell forwards they'd still be in the boat.",
        ),
    ),
    (
        "fallback-2",
        "pun",
        Text::TwoPart(
            "What did the snail say when it met a slug?",
            "Nice to see you've finally come out of your shell.",
        ),
    ),
    (
        "fallback-3",
        "programming",
        Text::Single(
            "Mathematics is like love: a simple idea, but it can get complicated.",
        ),
    ),
    (
        "fallback-4",
        "programming",
        Text::TwoPart(
            "Why do programmers prefer dark mode?",
            "Because light attracts bugs.",
        ),
    ),
    (
        "fallback-5",
        "pun",
        Text::Single("I used to be a banker, but I lost interest."),
    ),
];

pub static FALLBACK_JOKES: Lazy<Vec<JokeRecord>> = Lazy::new(|| {
    BUNDLED
        .iter()
        .map(|(id, category, text)| match text {
            Text::Single(joke) => JokeRecord::single(*id, *category, *joke),
            Text::TwoPart(setup, delivery) => {
                JokeRecord::two_part(*id, *category, *setup, *delivery)
            }
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bundled_set_is_non_empty_with_unique_ids() {
        assert!(!FALLBACK_JOKES.is_empty());
        let ids: HashSet<_> = FALLBACK_JOKES.iter().map(|j| j.id.clone()).collect();
        assert_eq!(ids.len(), FALLBACK_JOKES.len());
    }
}
