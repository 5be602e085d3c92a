// src/blog.rs

//! Blog posts: form validation and list filters

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::validation::{is_http_url, FieldErrors, FormField};
use crate::types::BlogSlug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub slug: BlogSlug,
    pub cover_image: String,
    pub author: Author,
    pub created_at: String,
}

/// Body of the blog create / update calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogForm {
    pub title: String,
    pub description: String,
    pub content: String,
    pub cover_image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlogField {
    Title,
    Description,
    Content,
    CoverImage,
}

impl FormField for BlogField {
    fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Content => "content",
            Self::CoverImage => "coverImage",
        }
    }
}

impl BlogForm {
    pub fn from_blog(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            description: blog.description.clone(),
            content: blog.content.clone(),
            cover_image: blog.cover_image.clone(),
        }
    }

    pub fn validate(&self) -> FieldErrors<BlogField> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.insert(BlogField::Title, "Title is a required field");
        }
        if self.description.trim().is_empty() {
            errors.insert(BlogField::Description, "Description is a required field");
        }
        if self.content.trim().is_empty() {
            errors.insert(BlogField::Content, "Content is a required field");
        }
        if self.cover_image.is_empty() {
            errors.insert(BlogField::CoverImage, "Cover image is a required field");
        } else if !is_http_url(&self.cover_image) {
            errors.insert(BlogField::CoverImage, "Invalid image");
        }
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlogSort {
    #[default]
    Default,
    NameAsc,
    NameDesc,
    DateDesc,
    DateAsc,
}

impl BlogSort {
    pub const ALL: [BlogSort; 5] = [
        Self::Default,
        Self::NameAsc,
        Self::NameDesc,
        Self::DateDesc,
        Self::DateAsc,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::NameAsc => "NAME_ASC",
            Self::NameDesc => "NAME_DESC",
            Self::DateDesc => "DATE_DESC",
            Self::DateAsc => "DATE_ASC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::NameAsc => "A -> Z",
            Self::NameDesc => "Z -> A",
            Self::DateDesc => "Newest",
            Self::DateAsc => "Oldest",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .unwrap_or_default()
    }
}

/// Filters of `GET /blogs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogListParams {
    pub page: u32,
    pub limit: u32,
    pub sort: BlogSort,
    pub authors: Vec<String>,
    pub keyword: Option<String>,
    pub create_date_range: Vec<NaiveDate>,
}

impl Default for BlogListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 6,
            sort: BlogSort::Default,
            authors: Vec::new(),
            keyword: None,
            create_date_range: Vec::new(),
        }
    }
}

impl BlogListParams {
    /// Query pairs; list values repeat their `[]` key and dates are `YYYY-MM-DD`
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("sortStyle".to_string(), self.sort.code().to_string()),
        ];
        for author in &self.authors {
            query.push(("authors[]".to_string(), author.clone()));
        }
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
            query.push(("keyword".to_string(), keyword.trim().to_string()));
        }
        for date in &self.create_date_range {
            query.push((
                "createDateRange[]".to_string(),
                date.format("%Y-%m-%d").to_string(),
            ));
        }
        query
    }

    pub fn toggle_author(&mut self, author_id: &str) {
        match self.authors.iter().position(|a| a == author_id) {
            Some(idx) => {
                self.authors.remove(idx);
            }
            None => self.authors.push(author_id.to_string()),
        }
        self.page = 1;
    }
}

/// Page of `GET /blogs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPage {
    #[serde(rename = "data")]
    pub blogs: Vec<Blog>,
    #[serde(default)]
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let errors = BlogForm::default().validate();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(BlogField::Title), Some("Title is a required field"));
    }

    #[test]
    fn test_valid_form() {
        let form = BlogForm {
            title: "Summer lookbook".to_string(),
            description: "Linen and light colors".to_string(),
            content: "<p>...</p>".to_string(),
            cover_image: "https://res.cloudinary.com/x/cover.jpg".to_string(),
        };
        assert!(form.validate().is_empty());
        assert_eq!(serde_json::to_value(&form).unwrap()["coverImage"], form.cover_image);
    }

    #[test]
    fn test_query_formats_dates_and_lists() {
        let params = BlogListParams {
            authors: vec!["a1".to_string(), "a2".to_string()],
            keyword: Some(" linen ".to_string()),
            sort: BlogSort::DateDesc,
            create_date_range: vec![
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            ],
            ..BlogListParams::default()
        };
        let query = params.to_query();
        let pairs: Vec<(&str, &str)> = query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("page", "1"),
                ("limit", "6"),
                ("sortStyle", "DATE_DESC"),
                ("authors[]", "a1"),
                ("authors[]", "a2"),
                ("keyword", "linen"),
                ("createDateRange[]", "2024-03-01"),
                ("createDateRange[]", "2024-03-31"),
            ]
        );
    }

    #[test]
    fn test_toggle_author_resets_page() {
        let mut params = BlogListParams {
            page: 3,
            ..BlogListParams::default()
        };
        params.toggle_author("a1");
        assert_eq!(params.authors, vec!["a1"]);
        assert_eq!(params.page, 1);
        params.toggle_author("a1");
        assert!(params.authors.is_empty());
    }

    #[test]
    fn test_sort_codes() {
        assert_eq!(BlogSort::from_code("NAME_DESC"), BlogSort::NameDesc);
        assert_eq!(BlogSort::from_code("bogus"), BlogSort::Default);
    }
}
