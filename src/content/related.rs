//! Related posts per category, shown under a post

use indexmap::IndexMap;
use rand::Rng;

use super::{Category, Post};
use crate::api::{queries, ContentSource};

/// Regular (non read-also, non affiliate) posts kept per category
pub const REGULAR_CAP: usize = 4;

/// Related posts keyed by category slug, in category order
pub type RelatedGroups = IndexMap<String, Vec<Post>>;

/// Pick up to four regular posts plus at most one special post
///
/// The special post is the first read-also post or the first affiliate post;
/// when both exist, one of them is chosen with even odds.
pub fn related_posts<R: Rng + ?Sized>(posts: &[Post], rng: &mut R) -> Vec<Post> {
    let read_also = posts.iter().find(|p| p.is_read_also);
    let affiliate = posts.iter().find(|p| p.is_affiliate);

    let special = match (read_also, affiliate) {
        (Some(read_also), Some(affiliate)) => {
            if rng.gen_bool(0.5) {
                Some(read_also)
            } else {
                Some(affiliate)
            }
        }
        (read_also, affiliate) => read_also.or(affiliate),
    };

    let mut related: Vec<Post> = posts
        .iter()
        .filter(|p| !p.is_special())
        .take(REGULAR_CAP)
        .cloned()
        .collect();
    related.extend(special.cloned());
    related
}

/// Fetch each category's posts, one category at a time
///
/// A category whose listing fails gets an empty list.
pub async fn fetch_category_posts<S: ContentSource + ?Sized>(
    source: &S,
    categories: &[Category],
) -> IndexMap<String, Vec<Post>> {
    let mut fetched = IndexMap::with_capacity(categories.len());

    for category in categories {
        let posts = match queries::posts_by_category(source, &category.slug).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!("Related posts for {:?} unavailable: {}", category.slug, e);
                Vec::new()
            }
        };
        fetched.insert(category.slug.clone(), posts);
    }

    fetched
}

/// Reduce fetched category listings to related groups
pub fn group_related<R: Rng + ?Sized>(
    fetched: &IndexMap<String, Vec<Post>>,
    rng: &mut R,
) -> RelatedGroups {
    fetched
        .iter()
        .map(|(slug, posts)| (slug.clone(), related_posts(posts, rng)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemorySource;
    use crate::content::TermRef;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn post(slug: &str) -> Post {
        Post::new(slug, slug)
    }

    fn read_also(slug: &str) -> Post {
        let mut p = post(slug);
        p.is_read_also = true;
        p
    }

    fn affiliate(slug: &str) -> Post {
        let mut p = post(slug);
        p.is_affiliate = true;
        p
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_regular_posts_capped_and_special_last() {
        let posts = vec![
            post("r1"),
            read_also("ra"),
            post("r2"),
            post("r3"),
            post("r4"),
            post("r5"),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let related = related_posts(&posts, &mut rng);
        assert_eq!(slugs(&related), vec!["r1", "r2", "r3", "r4", "ra"]);
    }

    #[test]
    fn test_only_affiliate_is_used() {
        let posts = vec![post("r1"), affiliate("af1"), affiliate("af2")];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(slugs(&related_posts(&posts, &mut rng)), vec!["r1", "af1"]);
    }

    #[test]
    fn test_no_special_posts() {
        let posts = vec![post("r1"), post("r2")];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(slugs(&related_posts(&posts, &mut rng)), vec!["r1", "r2"]);
    }

    #[test]
    fn test_both_candidates_pick_either() {
        let posts = vec![post("r1"), read_also("ra"), affiliate("af")];
        let mut seen = std::collections::HashSet::new();

        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let related = related_posts(&posts, &mut rng);
            assert_eq!(related.len(), 2);
            assert_eq!(related[0].slug, "r1");
            let special = related[1].slug.clone();
            assert!(special == "ra" || special == "af");
            seen.insert(special);
        }

        assert_eq!(seen.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_category_degrades_to_empty() {
        let filed = |slug: &str, cat: &str| {
            let mut p = post(slug);
            p.category = Some(TermRef {
                id: None,
                name: cat.to_string(),
                slug: cat.to_string(),
            });
            p
        };
        let mut source = MemorySource::new(vec![filed("n1", "news"), filed("s1", "sports")]);
        source.failing_categories.insert("news".to_string());
        let categories = vec![Category::new("News", "news"), Category::new("Sports", "sports")];

        let fetched = fetch_category_posts(&source, &categories).await;
        let mut rng = StdRng::seed_from_u64(3);
        let groups = group_related(&fetched, &mut rng);

        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec!["news", "sports"]);
        assert!(groups["news"].is_empty());
        assert_eq!(slugs(&groups["sports"]), vec!["s1"]);
    }
}
