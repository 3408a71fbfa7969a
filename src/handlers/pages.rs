//! Welcome and observation-form pages

use axum::response::Html;
use axum::Form;
use serde::Deserialize;

use crate::render;

#[derive(Debug, Deserialize)]
pub struct WelcomeForm {
    pub name: String,
}

/// Landing page with the name form.
pub async fn welcome() -> Html<String> {
    Html(render::welcome_page())
}

/// Personalized observation form.
pub async fn input(Form(form): Form<WelcomeForm>) -> Html<String> {
    Html(render::input_page(form.name.trim()))
}
