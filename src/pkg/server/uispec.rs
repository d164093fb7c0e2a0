use askama::Template;

#[derive(Template)]
#[template(path = "rush.html")]
pub struct Rush {
    pub years: Vec<&'static str>,
    pub max_upload_mb: usize,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct Admin {}
