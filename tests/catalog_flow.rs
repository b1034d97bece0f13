use jamendo_rs::catalog::{offset_for, parse_page};
use jamendo_rs::error::CatalogError;
use jamendo_rs::model::{search, CatalogPage, CatalogState};

fn response(ids: &[(&str, &str, &str)]) -> String {
    let results: Vec<String> = ids
        .iter()
        .map(|(id, name, artist)| {
            format!(
                r#"{{"id":{id},"name":"{name}","duration":"201","artist_name":"{artist}",
                   "album_name":"Album","audio":"https://audio/{id}","image":"https://img/{id}",
                   "shareurl":"https://share/{id}"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"headers":{{"status":"success","code":0,"error_message":"","warnings":"","results_count":{}}},"results":[{}]}}"#,
        ids.len(),
        results.join(",")
    )
}

#[test]
fn pages_accumulate_until_a_short_page() {
    let mut state = CatalogState::default();

    let first = state.begin_next_page().unwrap();
    assert_eq!(first, 1);
    assert_eq!(offset_for(first, 2), 0);
    let body = response(&[("1", "Morning", "Ada"), ("2", "Noon", "Bo")]);
    let page = parse_page(&body, first, 2).unwrap();
    assert!(page.has_more);
    assert_eq!(state.apply_page(page).unwrap().len(), 2);

    let second = state.begin_next_page().unwrap();
    assert_eq!(second, 2);
    assert_eq!(offset_for(second, 2), 2);
    let body = response(&[("3", "Evening", "Ada")]);
    let page = parse_page(&body, second, 2).unwrap();
    assert!(!page.has_more);
    state.apply_page(page).unwrap();

    assert_eq!(state.tracks.len(), 3);
    assert_eq!(state.begin_next_page(), None);

    let ids: Vec<&str> = state.tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(state.tracks[0].duration, 201);
    assert_eq!(state.tracks[0].image.as_deref(), Some("https://img/1"));
}

#[test]
fn search_over_accumulated_tracks() {
    let mut state = CatalogState::default();
    let page = state.begin_next_page().unwrap();
    let body = response(&[
        ("1", "Morning Light", "Ada"),
        ("2", "Night Drive", "Bo"),
        ("3", "Daylight", "Adam"),
    ]);
    state.apply_page(parse_page(&body, page, 30).unwrap());

    let names: Vec<&str> = search::filter(&state.tracks, "LIGHT")
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, ["Morning Light", "Daylight"]);

    let by_artist = search::filter(&state.tracks, " ada ");
    assert_eq!(by_artist.len(), 2);

    assert_eq!(search::filter(&state.tracks, "   ").len(), 3);
    assert!(search::filter(&state.tracks, "zzz").is_empty());
}

#[test]
fn stale_page_is_ignored() {
    let mut state = CatalogState::default();
    state.begin_next_page();
    let stale = CatalogPage {
        page: 7,
        tracks: Vec::new(),
        has_more: false,
    };
    assert!(state.apply_page(stale).is_none());
    assert!(state.has_more);
    assert_eq!(state.in_flight(), Some(1));
}

#[test]
fn failed_api_status_is_an_error() {
    let body = r#"{"headers":{"status":"failed","code":2,"error_message":"Rate limit"},"results":[]}"#;
    assert!(matches!(
        parse_page(body, 1, 30),
        Err(CatalogError::Api { code: 2, .. })
    ));
}
