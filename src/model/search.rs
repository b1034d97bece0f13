//! Client-side search over the accumulated track list

use super::track::Track;

/// Case-insensitive substring match against track name or artist name.
///
/// A blank query returns every track. Relative order is always preserved.
pub fn filter<'a>(tracks: &'a [Track], query: &str) -> Vec<&'a Track> {
    let query = query.trim();
    if query.is_empty() {
        return tracks.iter().collect();
    }

    let needle = query.to_lowercase();
    tracks
        .iter()
        .filter(|track| {
            track.name.to_lowercase().contains(&needle)
                || track.artist_name.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::sample_track;
    use proptest::prelude::*;

    fn named(id: &str, name: &str, artist: &str) -> Track {
        Track {
            name: name.to_string(),
            artist_name: artist.to_string(),
            ..sample_track(id)
        }
    }

    fn ids(tracks: &[&Track]) -> Vec<String> {
        tracks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn matches_name_or_artist_ignoring_case() {
        let tracks = vec![
            named("1", "Midnight Drive", "Lumen"),
            named("2", "Morning", "The Midnights"),
            named("3", "Noon", "Solar"),
        ];
        assert_eq!(ids(&filter(&tracks, "MIDNIGHT")), vec!["1", "2"]);
        assert_eq!(ids(&filter(&tracks, "sol")), vec!["3"]);
        assert!(filter(&tracks, "jazz").is_empty());
    }

    #[test]
    fn blank_query_returns_everything() {
        let tracks = vec![named("1", "a", "b"), named("2", "c", "d")];
        assert_eq!(ids(&filter(&tracks, "")), vec!["1", "2"]);
        assert_eq!(ids(&filter(&tracks, "   \t")), vec!["1", "2"]);
    }

    #[test]
    fn query_is_trimmed() {
        let tracks = vec![named("1", "Blue", "x")];
        assert_eq!(ids(&filter(&tracks, "  blue ")), vec!["1"]);
    }

    proptest! {
        #[test]
        fn result_is_ordered_subsequence(
            names in proptest::collection::vec("[a-cA-C ]{0,6}", 0..20),
            query in "[a-cA-C ]{0,3}",
        ) {
            let tracks: Vec<Track> = names
                .iter()
                .enumerate()
                .map(|(i, n)| named(&i.to_string(), n, "artist"))
                .collect();
            let result = filter(&tracks, &query);

            let mut cursor = 0;
            for hit in &result {
                let pos = tracks[cursor..].iter().position(|t| t.id == hit.id);
                prop_assert!(pos.is_some());
                cursor += pos.unwrap() + 1;
            }
        }

        #[test]
        fn empty_query_is_identity(names in proptest::collection::vec("[a-z]{0,6}", 0..20)) {
            let tracks: Vec<Track> = names
                .iter()
                .enumerate()
                .map(|(i, n)| named(&i.to_string(), n, n))
                .collect();
            let result = filter(&tracks, "");
            prop_assert_eq!(result.len(), tracks.len());
            for (a, b) in result.iter().zip(tracks.iter()) {
                prop_assert_eq!(*a, b);
            }
        }
    }
}
