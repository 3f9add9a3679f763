//! `Accept` header negotiation.
//!
//! Ranges are ranked by q-value. When an offer is matched by several ranges,
//! the most specific one decides its quality (`text/html` over `text/*` over
//! `*/*`).

use mime::Mime;

/// A parsed media range with its quality.
#[derive(Debug, Clone, PartialEq)]
struct MediaRange {
    mime: Mime,
    quality: f32,
}

impl MediaRange {
    /// 2 for an exact match, 1 for `type/*`, 0 for `*/*`, `None` if no match.
    fn specificity(&self, offer: &Mime) -> Option<u8> {
        if self.mime.type_() == mime::STAR {
            return Some(0);
        }
        if self.mime.type_() != offer.type_() {
            return None;
        }
        if self.mime.subtype() == mime::STAR {
            return Some(1);
        }
        (self.mime.subtype() == offer.subtype()).then_some(2)
    }
}

/// The parsed value of an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptHeader {
    ranges: Vec<MediaRange>,
}

impl AcceptHeader {
    /// Parse a header value. Unparseable ranges are skipped; an empty header
    /// accepts everything.
    pub fn parse(value: Option<&str>) -> Self {
        let ranges: Vec<MediaRange> = value
            .unwrap_or_default()
            .split(',')
            .filter_map(|part| part.trim().parse::<Mime>().ok())
            .map(|mime| {
                let quality = mime
                    .get_param("q")
                    .and_then(|q| q.as_str().parse::<f32>().ok())
                    .unwrap_or(1.0)
                    .clamp(0.0, 1.0);
                MediaRange { mime, quality }
            })
            .collect();

        if ranges.is_empty() {
            return Self {
                ranges: vec![MediaRange {
                    mime: mime::STAR_STAR,
                    quality: 1.0,
                }],
            };
        }
        Self { ranges }
    }

    /// Quality and specificity of the best range matching `offer`. Among
    /// equally specific ranges the highest quality counts.
    fn rank(&self, offer: &Mime) -> Option<(f32, u8)> {
        self.ranges
            .iter()
            .filter_map(|range| range.specificity(offer).map(|s| (range.quality, s)))
            .max_by(|(qa, sa), (qb, sb)| sa.cmp(sb).then(qa.total_cmp(qb)))
    }

    /// Quality the client assigns to `offer`, 0 when unacceptable.
    pub fn quality(&self, offer: &str) -> f32 {
        offer
            .parse::<Mime>()
            .ok()
            .and_then(|mime| self.rank(&mime))
            .map(|(quality, _)| quality)
            .unwrap_or(0.0)
    }

    /// Pick the offer the client prefers.
    ///
    /// Ties on quality go to the more specific match, then to the earlier
    /// offer.
    pub fn best_match<'a>(&self, offers: &[&'a str]) -> Option<&'a str> {
        let mut best: Option<(&'a str, f32, u8)> = None;
        for &offer in offers {
            let Some((quality, specificity)) = offer
                .parse::<Mime>()
                .ok()
                .and_then(|mime| self.rank(&mime))
            else {
                continue;
            };
            if quality <= 0.0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, q, s)) => quality > q || (quality == q && specificity > s),
            };
            if better {
                best = Some((offer, quality, specificity));
            }
        }
        best.map(|(offer, _, _)| offer)
    }
}

/// Convenience wrapper over [`AcceptHeader::best_match`].
pub fn best_match<'a>(accept: Option<&str>, offers: &[&'a str]) -> Option<&'a str> {
    AcceptHeader::parse(accept).best_match(offers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFERS: [&str; 2] = ["application/json", "text/html"];

    #[test]
    fn explicit_html_wins() {
        assert_eq!(best_match(Some("text/html"), &OFFERS), Some("text/html"));
    }

    #[test]
    fn explicit_json_wins() {
        assert_eq!(
            best_match(Some("application/json"), &OFFERS),
            Some("application/json")
        );
    }

    #[test]
    fn wildcard_prefers_first_offer() {
        assert_eq!(best_match(Some("*/*"), &OFFERS), Some("application/json"));
        assert_eq!(best_match(None, &OFFERS), Some("application/json"));
    }

    #[test]
    fn browser_header_prefers_html() {
        let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

        assert_eq!(best_match(Some(accept), &OFFERS), Some("text/html"));
    }

    #[test]
    fn specific_match_beats_wildcard_on_tie() {
        assert_eq!(
            best_match(Some("*/*, text/html"), &OFFERS),
            Some("text/html")
        );
    }

    #[test]
    fn quality_uses_most_specific_range() {
        let header = AcceptHeader::parse(Some("text/*;q=0.5, text/html;q=0.2, */*;q=0.1"));

        assert_eq!(header.quality("text/html"), 0.2);
        assert_eq!(header.quality("text/plain"), 0.5);
        assert_eq!(header.quality("application/json"), 0.1);
    }

    #[test]
    fn duplicate_ranges_keep_the_higher_quality() {
        let low_first = AcceptHeader::parse(Some("text/html;q=0.1, text/html;q=0.9"));
        let high_first = AcceptHeader::parse(Some("text/html;q=0.9, text/html;q=0.1"));

        assert_eq!(low_first.quality("text/html"), 0.9);
        assert_eq!(high_first.quality("text/html"), 0.9);
        assert_eq!(
            best_match(Some("application/json;q=0.5, text/html;q=0.1, text/html;q=0.9"), &OFFERS),
            Some("text/html")
        );
    }

    #[test]
    fn zero_quality_is_rejected() {
        assert_eq!(best_match(Some("text/html;q=0"), &OFFERS), None);
    }
}
