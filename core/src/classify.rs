use url::Url;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "gif", "png", "webp"];
pub const YOUTUBE_THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "youtu.be"];
const QUERY_ID_STOPS: &[char] = &['&', '#'];
const SHORT_ID_STOPS: &[char] = &['&', '#', '?', '/'];
const SHORT_LINK_MARKER: &str = "youtu.be/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlKind {
    YouTube,
    Gif,
    Image,
    Link,
}

/// Classifies a submitted URL in ingestion precedence order.
pub fn classify_url(url: &str) -> UrlKind {
    if is_youtube_url(url) {
        UrlKind::YouTube
    } else if is_gif_url(url) {
        UrlKind::Gif
    } else if is_image_url(url) {
        UrlKind::Image
    } else {
        UrlKind::Link
    }
}

pub fn is_image_url(url: &str) -> bool {
    match path_extension(url) {
        Some(ext) => IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)),
        None => false,
    }
}

pub fn is_gif_url(url: &str) -> bool {
    path_extension(url).is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}

pub fn is_youtube_url(url: &str) -> bool {
    let Some((host, rest)) = split_host(url) else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if !YOUTUBE_HOSTS.contains(&host) {
        return false;
    }
    rest.strip_prefix('/').is_some_and(|path| !path.is_empty())
}

/// Returns the `v=` query value or the first path segment after `youtu.be/`,
/// whichever occurs first in the string. The short-link host is matched
/// without regard to case; the id keeps its original case.
pub fn extract_youtube_video_id(url: &str) -> Option<String> {
    let query = ["?v=", "&v="]
        .iter()
        .filter_map(|marker| url.find(marker).map(|pos| (pos, pos + marker.len())))
        .min_by_key(|(pos, _)| *pos);
    let short = url
        .to_ascii_lowercase()
        .find(SHORT_LINK_MARKER)
        .map(|pos| (pos, pos + SHORT_LINK_MARKER.len()));
    let (start, stops) = match (query, short) {
        (Some(q), Some(s)) if s.0 < q.0 => (s.1, SHORT_ID_STOPS),
        (Some(q), _) => (q.1, QUERY_ID_STOPS),
        (None, Some(s)) => (s.1, SHORT_ID_STOPS),
        (None, None) => return None,
    };
    let tail = &url[start..];
    let end = tail.find(stops).unwrap_or(tail.len());
    let id = &tail[..end];
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("{YOUTUBE_THUMBNAIL_BASE}/{video_id}/hqdefault.jpg")
}

fn split_host(url: &str) -> Option<(&str, &str)> {
    let lower = url.get(..8).map(str::to_ascii_lowercase).unwrap_or_default();
    let without_scheme = if lower.starts_with("https://") {
        &url[8..]
    } else if lower.starts_with("http://") {
        &url[7..]
    } else {
        url
    };
    let end = without_scheme
        .find(['/', '?', '#'])
        .unwrap_or(without_scheme.len());
    if end == 0 {
        return None;
    }
    Some(without_scheme.split_at(end))
}

fn path_extension(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) if !parsed.cannot_be_a_base() => parsed.path().to_string(),
        Ok(_) => return None,
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    };
    let file = path.rsplit('/').next().unwrap_or(&path);
    let (_, ext) = file.rsplit_once('.')?;
    Some(ext.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extension_is_case_insensitive() {
        assert!(is_image_url("a.PNG"));
        assert!(is_image_url("https://example.com/photos/cat.JpEg"));
        assert!(is_image_url("https://example.com/cat.webp?size=large#top"));
        assert!(!is_image_url("a.bmp"));
        assert!(!is_image_url("https://example.com/png"));
        assert!(!is_image_url("https://example.com/"));
    }

    #[test]
    fn data_uris_are_not_image_urls() {
        assert!(!is_image_url("data:image/png;base64,iVBORw0KGgo="));
    }

    #[test]
    fn gif_detection_uses_path_only() {
        assert!(is_gif_url("https://media.example.com/dance.GIF"));
        assert!(!is_gif_url("https://example.com/page?file=dance.gif"));
    }

    #[test]
    fn youtube_hosts_match_with_optional_scheme_and_www() {
        assert!(is_youtube_url("https://youtu.be/xyz"));
        assert!(is_youtube_url("http://www.youtube.com/watch?v=abc"));
        assert!(is_youtube_url("youtube.com/watch?v=abc"));
        assert!(is_youtube_url("WWW.YouTube.com/shorts/abc"));
        assert!(!is_youtube_url("https://youtube.com/"));
        assert!(!is_youtube_url("https://notyoutube.com/watch?v=abc"));
        assert!(!is_youtube_url("https://youtube.com.evil.example/watch?v=abc"));
        assert!(!is_youtube_url("ftp://youtube.com/watch?v=abc"));
    }

    #[test]
    fn video_id_from_query_or_short_link() {
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/watch?v=ABC123").as_deref(),
            Some("ABC123")
        );
        assert_eq!(
            extract_youtube_video_id("https://youtu.be/ABC123").as_deref(),
            Some("ABC123")
        );
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/watch?list=PL1&v=XYZ&t=10#c").as_deref(),
            Some("XYZ")
        );
        assert_eq!(
            extract_youtube_video_id("https://youtu.be/ABC123?si=share").as_deref(),
            Some("ABC123")
        );
    }

    #[test]
    fn short_link_host_is_case_insensitive() {
        for url in ["https://YOUTU.BE/dQw4w9WgXcQ", "Youtu.be/dQw4w9WgXcQ"] {
            assert!(is_youtube_url(url), "{url}");
            assert_eq!(
                extract_youtube_video_id(url).as_deref(),
                Some("dQw4w9WgXcQ"),
                "{url}"
            );
        }
    }

    #[test]
    fn video_id_missing_or_empty_is_none() {
        assert_eq!(extract_youtube_video_id("https://www.youtube.com/channel/foo"), None);
        assert_eq!(extract_youtube_video_id("https://www.youtube.com/watch?v="), None);
        assert_eq!(extract_youtube_video_id(""), None);
    }

    #[test]
    fn classification_precedence() {
        assert_eq!(classify_url("https://youtu.be/clip.gif"), UrlKind::YouTube);
        assert_eq!(classify_url("https://example.com/a.gif"), UrlKind::Gif);
        assert_eq!(classify_url("https://example.com/a.jpg"), UrlKind::Image);
        assert_eq!(classify_url("https://example.com/article"), UrlKind::Link);
    }

    #[test]
    fn thumbnail_is_derived_from_id() {
        assert_eq!(
            youtube_thumbnail_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }
}
