use std::cell::RefCell;
use std::collections::HashMap;

use super::*;
use crate::types::SearchHit;

const GBU_TERM: &str = "The Good, the Bad and the Ugly";

struct Fixture {
    hits: Vec<SearchHit>,
    details: HashMap<String, RawMovie>,
    requested: RefCell<Vec<String>>,
}

impl Fixture {
    fn new(hits: Vec<SearchHit>, details: Vec<RawMovie>) -> Self {
        Self {
            hits,
            details: details.into_iter().map(|d| (d.id.clone(), d)).collect(),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl MetadataSource for Fixture {
    fn search(&self, _term: &str) -> Result<Vec<SearchHit>, ScrapeError> {
        Ok(self.hits.clone())
    }

    fn fetch_details(&self, id: &str) -> Result<RawMovie, ScrapeError> {
        self.requested.borrow_mut().push(id.to_string());
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| ScrapeError::ServerError {
                status: 404,
                message: format!("no movie {id}"),
            })
    }
}

fn hit(id: &str, title: &str) -> SearchHit {
    SearchHit {
        id: id.to_string(),
        title: title.to_string(),
        year: None,
    }
}

fn gbu_raw() -> RawMovie {
    RawMovie {
        id: "0060196".to_string(),
        title: Some("Il buono, il brutto, il cattivo.".to_string()),
        year: Some(LooseNumber::Int(1966)),
        runtimes: vec![LooseNumber::from("161"), LooseNumber::from("178")],
        rating: Some(LooseNumber::Float(9.0)),
        plot_outline: Some(
            "A bounty hunting scam joins two men in an uneasy alliance.".to_string(),
        ),
        cover_url: Some(
            "http://ia.media-imdb.com/images/M/MV5BOTQ5NDI3MTI4MF5BMl5BanBnXkFtZTgwNDQ4ODE5MDE@._V1._SX214_.jpg"
                .to_string(),
        ),
        genres: vec!["Adventure".to_string(), "Western".to_string()],
        cast: vec![
            Credit::new("0000142", "Clint Eastwood"),
            Credit::new("0906223", "Eli Wallach"),
            Credit::new("0001812", "Lee Van Cleef"),
        ],
        directors: vec![Credit::new("0001466", "Sergio Leone")],
    }
}

#[test]
fn test_lookup_good_bad_ugly() {
    let source = Fixture::new(
        vec![hit("0060196", "Il buono, il brutto, il cattivo.")],
        vec![gbu_raw()],
    );
    let record = lookup_movie(&source, GBU_TERM).unwrap();

    assert_eq!(record.mid, "0060196");
    assert_eq!(record.title, "Il buono, il brutto, il cattivo.");
    assert_eq!(record.idx, "G");
    assert_eq!(record.year, 1966);
    assert_eq!(record.runtime, 161);
    assert_eq!(record.rating, 9.0);
    assert_eq!(record.genres, vec!["Adventure", "Western"]);
    assert_eq!(record.cast.len(), 3);
    assert_eq!(record.crew.get("0001466").map(String::as_str), Some("Sergio Leone"));
    assert!(record.artwork.thumb.unwrap().ends_with("_SX95.jpg"));
    assert!(record.artwork.image.unwrap().ends_with("_SX300.jpg"));
}

#[test]
fn test_first_hit_wins() {
    let mut remake = gbu_raw();
    remake.id = "9999999".to_string();
    remake.title = Some("The Good, the Bad and the Ugly (Remake)".to_string());

    let source = Fixture::new(
        vec![hit("0060196", "Il buono"), hit("9999999", "Remake")],
        vec![gbu_raw(), remake],
    );
    let record = lookup_movie(&source, GBU_TERM).unwrap();
    assert_eq!(record.mid, "0060196");
    assert_eq!(*source.requested.borrow(), vec!["0060196"]);
}

#[test]
fn test_no_hits_is_not_found() {
    let source = Fixture::new(vec![], vec![]);
    let err = lookup_movie(&source, "Nonexistent Movie").unwrap_err();
    assert!(err.is_not_found());
    assert!(source.requested.borrow().is_empty());
}

#[test]
fn test_details_error_is_surfaced() {
    let source = Fixture::new(vec![hit("0060196", "Il buono")], vec![]);
    let err = lookup_movie(&source, GBU_TERM).unwrap_err();
    assert!(matches!(err, ScrapeError::ServerError { status: 404, .. }));
}

#[test]
fn test_idx_ignores_provider_title() {
    let record = normalize("Aliens", &gbu_raw()).unwrap();
    assert_eq!(record.idx, "A");
}

#[test]
fn test_non_numeric_runtime_is_malformed() {
    let mut raw = gbu_raw();
    raw.runtimes = vec![LooseNumber::from("two hours")];
    let err = normalize(GBU_TERM, &raw).unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::MalformedMetadata { field: "runtimes", .. }
    ));
}

#[test]
fn test_missing_runtime_is_malformed() {
    let mut raw = gbu_raw();
    raw.runtimes.clear();
    assert!(matches!(
        normalize(GBU_TERM, &raw).unwrap_err(),
        ScrapeError::MalformedMetadata { field: "runtimes", .. }
    ));
}

#[test]
fn test_bad_year_and_rating_are_malformed() {
    let mut raw = gbu_raw();
    raw.year = Some(LooseNumber::from("sixties"));
    assert!(matches!(
        normalize(GBU_TERM, &raw).unwrap_err(),
        ScrapeError::MalformedMetadata { field: "year", .. }
    ));

    let mut raw = gbu_raw();
    raw.rating = None;
    assert!(matches!(
        normalize(GBU_TERM, &raw).unwrap_err(),
        ScrapeError::MalformedMetadata { field: "rating", .. }
    ));
}

#[test]
fn test_numeric_strings_are_coerced() {
    let mut raw = gbu_raw();
    raw.year = Some(LooseNumber::from(" 1966 "));
    raw.rating = Some(LooseNumber::from("8.9"));
    raw.runtimes = vec![LooseNumber::Int(161)];
    let record = normalize(GBU_TERM, &raw).unwrap();
    assert_eq!(record.year, 1966);
    assert_eq!(record.rating, 8.9);
    assert_eq!(record.runtime, 161);
}

#[test]
fn test_missing_plot_is_empty_summary() {
    let mut raw = gbu_raw();
    raw.plot_outline = None;
    let record = normalize(GBU_TERM, &raw).unwrap();
    assert_eq!(record.summary, "");
}

#[test]
fn test_unmatched_cover_is_soft_failure() {
    let mut raw = gbu_raw();
    raw.cover_url = Some("http://example.com/poster.png".to_string());
    let record = normalize(GBU_TERM, &raw).unwrap();
    assert!(record.artwork.is_empty());

    raw.cover_url = None;
    assert!(normalize(GBU_TERM, &raw).unwrap().artwork.is_empty());
}

#[test]
fn test_duplicate_credit_last_write_wins() {
    let mut raw = gbu_raw();
    raw.cast = vec![
        Credit::new("0000142", "Clint Eastwood"),
        Credit::new("0000142", "Clint Eastwood (uncredited)"),
    ];
    let record = normalize(GBU_TERM, &raw).unwrap();
    assert_eq!(record.cast.len(), 1);
    assert_eq!(
        record.cast.get("0000142").map(String::as_str),
        Some("Clint Eastwood (uncredited)")
    );
}

#[test]
fn test_overlong_id_is_malformed() {
    let mut raw = gbu_raw();
    raw.id = "tt00601960".to_string();
    assert!(matches!(
        normalize(GBU_TERM, &raw).unwrap_err(),
        ScrapeError::MalformedMetadata { field: "id", .. }
    ));
}

#[test]
fn test_raw_movie_deserializes_provider_keys() {
    let json = r#"{
        "id": "0060196",
        "title": "Il buono, il brutto, il cattivo.",
        "year": 1966,
        "runtimes": ["161"],
        "rating": 9.0,
        "plot outline": "Three gunslingers.",
        "cover url": "http://host/images/x._V1._SX214_.jpg",
        "genres": ["Adventure", "Western"],
        "cast": [{"id": "0000142", "name": "Clint Eastwood"}],
        "director": [{"id": "0001466", "name": "Sergio Leone"}]
    }"#;
    let raw: RawMovie = serde_json::from_str(json).unwrap();
    assert_eq!(raw.plot_outline.as_deref(), Some("Three gunslingers."));
    assert_eq!(raw.directors, vec![Credit::new("0001466", "Sergio Leone")]);

    let record = normalize(GBU_TERM, &raw).unwrap();
    assert_eq!(record.runtime, 161);
    assert_eq!(record.rating, 9.0);
    assert_eq!(
        record.artwork.thumb.as_deref(),
        Some("http://host/images/x._V1._SX95.jpg")
    );
}
