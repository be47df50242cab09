use serde::Deserialize;
use url::Url;

use crate::traits::{CatalogDetail, CatalogPage, CatalogSummary};

/// Boilerplate credit Jikan appends to many synopses.
const SYNOPSIS_MARKER: &str = "[Written by MAL Rewrite]";

const NO_SYNOPSIS: &str = "No synopsis available";

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

// ── Listing / detail responses ──────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanPageResponse {
    pub data: Vec<JikanAnime>,
    pub pagination: Option<JikanPagination>,
}

#[derive(Debug, Deserialize)]
pub struct JikanItemResponse {
    pub data: JikanAnime,
}

#[derive(Debug, Deserialize)]
pub struct JikanPagination {
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    pub title: String,
    pub images: Option<JikanImages>,
    pub synopsis: Option<String>,
    pub episodes: Option<u32>,
    pub trailer: Option<JikanTrailer>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImage>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImage {
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanTrailer {
    pub url: Option<String>,
}

// ── Conversions to shared trait types ───────────────────────────

impl JikanAnime {
    fn image_url(&self) -> Option<String> {
        self.images
            .as_ref()
            .and_then(|images| images.jpg.as_ref())
            .and_then(|jpg| jpg.image_url.clone())
    }

    pub fn into_summary(self) -> CatalogSummary {
        CatalogSummary {
            item_id: self.mal_id,
            image_url: self.image_url(),
            title: self.title,
        }
    }

    pub fn into_detail(self) -> CatalogDetail {
        let image_url = self.image_url();
        CatalogDetail {
            item_id: self.mal_id,
            title: self.title,
            image_url,
            synopsis: clean_synopsis(self.synopsis.as_deref()),
            episodes: self.episodes,
            trailer_url: self
                .trailer
                .and_then(|t| t.url)
                .map(|url| embeddable_trailer(&url)),
        }
    }
}

impl JikanPageResponse {
    pub fn into_page(self) -> CatalogPage {
        // Older mirrors omit pagination; an empty page is the last one.
        let has_next = match &self.pagination {
            Some(p) => p.has_next_page,
            None => !self.data.is_empty(),
        };
        CatalogPage {
            items: self.data.into_iter().map(JikanAnime::into_summary).collect(),
            has_next,
        }
    }
}

/// Strip the rewrite credit and fall back to a placeholder when empty.
pub fn clean_synopsis(raw: Option<&str>) -> String {
    raw.map(|s| s.replace(SYNOPSIS_MARKER, "").trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NO_SYNOPSIS.to_string())
}

/// Rewrite a YouTube watch link into its embeddable player form.
///
/// Any other URL is returned unchanged.
pub fn embeddable_trailer(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };
    if !is_youtube_watch(&url) {
        return raw.to_string();
    }
    match url.query_pairs().find(|(key, _)| key == "v") {
        Some((_, video_id)) if !video_id.is_empty() => format!("{EMBED_BASE}{video_id}"),
        _ => raw.to_string(),
    }
}

fn is_youtube_watch(url: &Url) -> bool {
    matches!(
        url.host_str(),
        Some("youtube.com" | "www.youtube.com" | "m.youtube.com")
    ) && url.path() == "/watch"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_page_response() {
        let json = r#"{
            "pagination": {
                "last_visible_page": 1085,
                "has_next_page": true,
                "current_page": 1
            },
            "data": [
                {
                    "mal_id": 52991,
                    "title": "Sousou no Frieren",
                    "images": {
                        "jpg": {
                            "image_url": "https://cdn.myanimelist.net/images/anime/1015/138006.jpg",
                            "small_image_url": "https://cdn.myanimelist.net/images/anime/1015/138006t.jpg"
                        },
                        "webp": {
                            "image_url": "https://cdn.myanimelist.net/images/anime/1015/138006.webp"
                        }
                    },
                    "episodes": 28,
                    "score": 9.3
                },
                {
                    "mal_id": 5114,
                    "title": "Fullmetal Alchemist: Brotherhood"
                }
            ]
        }"#;

        let resp: JikanPageResponse = serde_json::from_str(json).unwrap();
        let page = resp.into_page();
        assert!(page.has_next);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].item_id, 52991);
        assert_eq!(
            page.items[0].image_url.as_deref(),
            Some("https://cdn.myanimelist.net/images/anime/1015/138006.jpg")
        );
        assert!(page.items[1].image_url.is_none());
    }

    #[test]
    fn test_page_without_pagination_uses_emptiness() {
        let resp: JikanPageResponse = serde_json::from_str(r#"{ "data": [] }"#).unwrap();
        assert!(!resp.into_page().has_next);

        let resp: JikanPageResponse =
            serde_json::from_str(r#"{ "data": [{ "mal_id": 1, "title": "Test" }] }"#).unwrap();
        assert!(resp.into_page().has_next);
    }

    #[test]
    fn test_deserialize_item_response() {
        let json = r#"{
            "data": {
                "mal_id": 52991,
                "title": "Sousou no Frieren",
                "images": { "jpg": { "image_url": "https://cdn.myanimelist.net/a.jpg" } },
                "synopsis": "After the party defeats the Demon King...\n\n[Written by MAL Rewrite]",
                "episodes": 28,
                "trailer": {
                    "youtube_id": "qgQVKK8ZA5I",
                    "url": "https://www.youtube.com/watch?v=qgQVKK8ZA5I",
                    "embed_url": null
                }
            }
        }"#;

        let resp: JikanItemResponse = serde_json::from_str(json).unwrap();
        let detail = resp.data.into_detail();
        assert_eq!(detail.item_id, 52991);
        assert_eq!(detail.synopsis, "After the party defeats the Demon King...");
        assert_eq!(detail.episodes, Some(28));
        assert_eq!(
            detail.trailer_url.as_deref(),
            Some("https://www.youtube.com/embed/qgQVKK8ZA5I")
        );
    }

    #[test]
    fn test_minimal_item_defaults() {
        let json = r#"{ "data": { "mal_id": 1, "title": "Test", "synopsis": null, "trailer": { "url": null } } }"#;
        let detail = serde_json::from_str::<JikanItemResponse>(json)
            .unwrap()
            .data
            .into_detail();
        assert_eq!(detail.synopsis, "No synopsis available");
        assert!(detail.episodes.is_none());
        assert!(detail.trailer_url.is_none());
        assert!(detail.image_url.is_none());
    }

    #[test]
    fn test_clean_synopsis() {
        assert_eq!(clean_synopsis(Some("Plain text.")), "Plain text.");
        assert_eq!(
            clean_synopsis(Some("Story. [Written by MAL Rewrite] ")),
            "Story."
        );
        assert_eq!(clean_synopsis(Some("[Written by MAL Rewrite]")), NO_SYNOPSIS);
        assert_eq!(clean_synopsis(Some("")), NO_SYNOPSIS);
        assert_eq!(clean_synopsis(None), NO_SYNOPSIS);
    }

    #[test]
    fn test_embeddable_trailer() {
        assert_eq!(
            embeddable_trailer("https://www.youtube.com/watch?v=abc123"),
            "https://www.youtube.com/embed/abc123"
        );
        assert_eq!(
            embeddable_trailer("https://youtube.com/watch?feature=share&v=abc123"),
            "https://www.youtube.com/embed/abc123"
        );
        // Already embeddable, or not YouTube at all.
        assert_eq!(
            embeddable_trailer("https://www.youtube.com/embed/abc123"),
            "https://www.youtube.com/embed/abc123"
        );
        assert_eq!(
            embeddable_trailer("https://vimeo.com/12345"),
            "https://vimeo.com/12345"
        );
        assert_eq!(
            embeddable_trailer("https://www.youtube.com/watch"),
            "https://www.youtube.com/watch"
        );
        assert_eq!(embeddable_trailer("not a url"), "not a url");
    }
}
