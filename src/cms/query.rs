//! Search query construction

/// A Prismic query predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact match on a document path, e.g. `document.type`
    At { path: String, value: String },
}

impl Predicate {
    pub fn at(path: &str, value: &str) -> Self {
        Predicate::At {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    fn render(&self) -> String {
        match self {
            Predicate::At { path, value } => {
                let value = value.replace('\\', "\\\\").replace('"', "\\\"");
                format!("[at({}, \"{}\")]", path, value)
            }
        }
    }
}

/// A documents search request
#[derive(Debug, Clone)]
pub struct Query {
    predicates: Vec<Predicate>,
    orderings: Option<String>,
    fetch: Vec<String>,
    page_size: u32,
    page: u32,
}

impl Query {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicates: vec![predicate],
            orderings: None,
            fetch: Vec::new(),
            page_size: 20,
            page: 1,
        }
    }

    /// Posts of a type, newest publication first, with the listing fields only
    pub fn listing(document_type: &str, page_size: u32, page: u32) -> Self {
        Self::new(Predicate::at("document.type", document_type))
            .orderings("[document.last_publication_date desc]")
            .fetch(&["title", "description", "cover"].map(|f| format!("{}.{}", document_type, f)))
            .page_size(page_size)
            .page(page)
    }

    /// Lookup of a single document by its UID
    pub fn by_uid(document_type: &str, uid: &str) -> Self {
        Self::new(Predicate::at(&format!("my.{}.uid", document_type), uid)).page_size(1)
    }

    pub fn orderings(mut self, orderings: &str) -> Self {
        self.orderings = Some(orderings.to_string());
        self
    }

    pub fn fetch<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.fetch = fields.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the 1-based page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// The `q` parameter: all predicates wrapped in a list
    pub fn q(&self) -> String {
        let inner: String = self.predicates.iter().map(Predicate::render).collect();
        format!("[{}]", inner)
    }

    /// Query string parameters for `documents/search`
    pub fn params(
        &self,
        reference: &str,
        access_token: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![("ref", reference.to_string()), ("q", self.q())];
        if let Some(orderings) = &self.orderings {
            params.push(("orderings", orderings.clone()));
        }
        if !self.fetch.is_empty() {
            params.push(("fetch", self.fetch.join(",")));
        }
        params.push(("pageSize", self.page_size.to_string()));
        params.push(("page", self.page.to_string()));
        if let Some(token) = access_token {
            params.push(("access_token", token.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_params() {
        let query = Query::listing("post", 2, 3);
        let params = query.params("MASTER", None);
        assert_eq!(
            params,
            vec![
                ("ref", "MASTER".to_string()),
                ("q", r#"[[at(document.type, "post")]]"#.to_string()),
                ("orderings", "[document.last_publication_date desc]".to_string()),
                ("fetch", "post.title,post.description,post.cover".to_string()),
                ("pageSize", "2".to_string()),
                ("page", "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_by_uid_params() {
        let query = Query::by_uid("post", "meu-post");
        let params = query.params("MASTER", Some("token"));
        assert_eq!(params[1], ("q", r#"[[at(my.post.uid, "meu-post")]]"#.to_string()));
        assert!(params.contains(&("pageSize", "1".to_string())));
        assert_eq!(params.last(), Some(&("access_token", "token".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "orderings" || *k == "fetch"));
    }

    #[test]
    fn test_predicate_value_is_escaped() {
        let query = Query::new(Predicate::at("my.post.uid", r#"a"b\c"#));
        assert_eq!(query.q(), r#"[[at(my.post.uid, "a\"b\\c")]]"#);
    }

    #[test]
    fn test_page_is_one_based() {
        let params = Query::listing("post", 0, 0).params("R", None);
        assert!(params.contains(&("pageSize", "1".to_string())));
        assert!(params.contains(&("page", "1".to_string())));
    }
}
