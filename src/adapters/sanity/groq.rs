//! GROQ query builders for the item listing and detail views.
//!
//! User input only ever reaches a query as a `$param`, never as text.

use serde_json::json;

use super::client::QueryParams;
use crate::domain::catalog::{ItemFilter, ItemListQuery, ItemSort};

/// Listed items: published, visible and not sponsor placements.
const VISIBLE_ITEMS: &str = r#"_type == "item" && defined(slug.current) && defined(publishDate) && forceHidden != true && sponsor != true"#;

const TAXON_PROJECTION: &str = r#"{_id, "name": coalesce(name, ""), "slug": coalesce(slug.current, "")}"#;

fn summary_projection() -> String {
    format!(
        r#"_id, _createdAt, name, "slug": slug.current, description, link, "featured": coalesce(featured, false), icon {{..., "blurDataURL": asset->metadata.lqip}}, image {{..., "blurDataURL": asset->metadata.lqip}}, publishDate, "categories": categories[]->{taxon}, "tags": tags[]->{taxon}"#,
        taxon = TAXON_PROJECTION
    )
}

/// Count and page queries sharing one filter and parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQueries {
    pub count: String,
    pub page: String,
    pub params: QueryParams,
}

fn list_filter(query: &ItemListQuery) -> (String, QueryParams) {
    let mut filter = String::from(VISIBLE_ITEMS);
    let mut params = QueryParams::new();

    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        filter.push_str(
            " && (name match $search || description match $search || introduction match $search)",
        );
        params.insert("search".to_string(), json!(format!("*{}*", search)));
    }

    if let Some(category) = &query.category {
        filter.push_str(" && $category in categories[]->slug.current");
        params.insert("category".to_string(), json!(category));
    }

    if !query.tags.is_empty() {
        filter.push_str(" && count((tags[]->slug.current)[@ in $tags]) == $tagCount");
        params.insert("tags".to_string(), json!(query.tags));
        params.insert("tagCount".to_string(), json!(query.tags.len()));
    }

    match query.filter {
        Some(ItemFilter::Featured) => filter.push_str(" && featured == true"),
        Some(ItemFilter::Free) => {
            filter.push_str(r#" && (pricePlan == "free" || !defined(pricePlan))"#)
        }
        Some(ItemFilter::Paid) => filter.push_str(r#" && pricePlan in ["pro", "sponsor"]"#),
        None => {}
    }

    if let Some(from) = &query.date_from {
        filter.push_str(" && publishDate >= $dateFrom");
        params.insert("dateFrom".to_string(), json!(from));
    }
    if let Some(to) = &query.date_to {
        filter.push_str(" && publishDate <= $dateTo");
        params.insert("dateTo".to_string(), json!(to));
    }

    (filter, params)
}

fn order_clause(sort: ItemSort) -> &'static str {
    match sort {
        ItemSort::Default => "order(coalesce(featured, false) desc, _createdAt desc)",
        ItemSort::TimeAsc => "order(_createdAt asc)",
        ItemSort::NameAsc => "order(name asc)",
        ItemSort::NameDesc => "order(name desc)",
    }
}

/// Builds the total-count query and the page query for a listing request.
pub fn list_queries(query: &ItemListQuery) -> ListQueries {
    let (filter, params) = list_filter(query);
    let start = query.offset();
    let end = start + u64::from(query.limit);

    ListQueries {
        count: format!("count(*[{}])", filter),
        page: format!(
            "*[{}] | {} [{}...{}] {{{}}}",
            filter,
            order_clause(query.sort),
            start,
            end,
            summary_projection()
        ),
        params,
    }
}

/// One visible item by `$slug`, with up to three related items sharing a category.
pub fn item_by_slug_query() -> String {
    format!(
        r#"*[_type == "item" && slug.current == $slug && forceHidden != true][0] {{{summary}, introduction, affiliateLink, "related": *[{visible} && count(categories[@._ref in ^.^.categories[]._ref]) > 0 && _id != ^._id] | order(publishDate desc, _createdAt desc) [0...3] {{{summary}}}}}"#,
        summary = summary_projection(),
        visible = VISIBLE_ITEMS
    )
}

pub const USER_BY_EMAIL: &str =
    r#"*[_type == "user" && email == $email][0] {_id, name, email, image, role}"#;

pub const SUBSCRIBER_BY_EMAIL: &str =
    r#"*[_type == "subscriber" && email == $email][0] {_id, email, status}"#;

pub const ORDER_BY_EXTERNAL_ID: &str = r#"*[_type == "order" && externalOrderId == $externalOrderId][0] {_id, "user": user._ref, "item": item._ref, status, provider, externalOrderId, date}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listing_hides_sponsors_and_unpublished() {
        let queries = list_queries(&ItemListQuery::default());
        assert!(queries.count.starts_with("count(*["));
        assert!(queries.count.contains("defined(publishDate)"));
        assert!(queries.count.contains("forceHidden != true"));
        assert!(queries.count.contains("sponsor != true"));
        assert!(queries.page.contains("order(coalesce(featured, false) desc, _createdAt desc)"));
        assert!(queries.page.contains("[0...12]"));
        assert!(queries.params.is_empty());
    }

    #[test]
    fn search_term_is_a_parameter() {
        let query = ItemListQuery {
            search: Some(r#"x" || true || ""#.to_string()),
            ..Default::default()
        };
        let queries = list_queries(&query);
        assert!(queries.count.contains("name match $search"));
        assert!(!queries.count.contains("|| true"));
        assert_eq!(queries.params["search"], json!(r#"*x" || true || "*"#));
    }

    #[test]
    fn tags_must_all_match() {
        let query = ItemListQuery {
            tags: vec!["rust".to_string(), "cli".to_string()],
            ..Default::default()
        };
        let queries = list_queries(&query);
        assert!(queries.count.contains("== $tagCount"));
        assert_eq!(queries.params["tagCount"], json!(2));
        assert_eq!(queries.params["tags"], json!(["rust", "cli"]));
    }

    #[test]
    fn paid_filter_covers_pro_and_sponsor() {
        let query = ItemListQuery {
            filter: Some(ItemFilter::Paid),
            ..Default::default()
        };
        assert!(list_queries(&query)
            .count
            .contains(r#"pricePlan in ["pro", "sponsor"]"#));
    }

    #[test]
    fn date_range_and_category_bind_params() {
        let query = ItemListQuery {
            category: Some("dev-tools".to_string()),
            date_from: Some("2024-01-01".to_string()),
            date_to: Some("2024-12-31".to_string()),
            ..Default::default()
        };
        let queries = list_queries(&query);
        assert!(queries.count.contains("publishDate >= $dateFrom"));
        assert!(queries.count.contains("publishDate <= $dateTo"));
        assert_eq!(queries.params["category"], json!("dev-tools"));
        assert_eq!(queries.params.len(), 3);
    }

    #[test]
    fn page_window_and_sort() {
        let query = ItemListQuery {
            page: 3,
            limit: 10,
            sort: ItemSort::NameDesc,
            ..Default::default()
        };
        let queries = list_queries(&query);
        assert!(queries.page.contains("| order(name desc) [20...30]"));
        assert!(!queries.count.contains("order("));
    }

    #[test]
    fn detail_query_selects_related_items() {
        let query = item_by_slug_query();
        assert!(query.contains("slug.current == $slug"));
        assert!(query.contains(r#""related": *["#));
        assert!(query.contains("[0...3]"));
    }
}
