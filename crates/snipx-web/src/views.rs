//! HTML pages
//!
//! Everything interpolated with `(...)` is escaped by maud. The only raw
//! insertion is the highlighter output on the snippet page.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use snipx_core::errors::FieldError;
use snipx_core::model::{Language, Snippet, SnippetDraft, Viewer};

const STYLE: &str = "\
body{font-family:sans-serif;max-width:960px;margin:0 auto;padding:1rem}\
nav a{margin-right:1rem}\
.badge{font-size:.75rem;padding:0 .4rem;border:1px solid #999;border-radius:3px}\
.errors{color:#a00}\
pre{padding:.75rem;overflow-x:auto}";

pub fn snippet_url(snippet: &Snippet) -> String {
    format!("/snippets/snippet/{}/", snippet.id)
}

fn language_url(language: &Language) -> String {
    format!("/snippets/lang/{}/", language.slug)
}

fn user_url(username: &str) -> String {
    format!("/snippets/user/{}/", username)
}

fn layout(viewer: &Viewer, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " | SnipX" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    a href="/" { "SnipX" }
                    @if let Some(user) = viewer.user() {
                        a href="/snippets/add/" { "New snippet" }
                        a href=(user_url(&user.username)) { "My snippets" }
                        form.inline method="post" action="/logout/" style="display:inline" {
                            button type="submit" { "Log out " (user.username) }
                        }
                    } @else {
                        a href="/login/" { "Log in" }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

fn visibility_badge(snippet: &Snippet) -> Markup {
    html! { span.badge { (snippet.visibility.as_str()) } }
}

/// Listing page; edit and delete links appear on the viewer's own rows
pub fn snippet_list(viewer: &Viewer, heading: &str, snippets: &[Snippet]) -> Markup {
    let content = html! {
        @if snippets.is_empty() {
            p.empty { "No snippets yet." }
        } @else {
            table.snippets {
                thead {
                    tr { th { "Name" } th { "Language" } th { "Owner" } th {} th {} }
                }
                tbody {
                    @for snippet in snippets {
                        tr {
                            td { a href=(snippet_url(snippet)) { (snippet.name) } }
                            td { a href=(language_url(&snippet.language)) { (snippet.language.name) } }
                            td { a href=(user_url(&snippet.owner.username)) { (snippet.owner.username) } }
                            td { (visibility_badge(snippet)) }
                            td {
                                @if viewer.is(&snippet.owner.username) {
                                    a href={ "/snippets/edit/" (snippet.id) "/" } { "edit" }
                                    " "
                                    a href={ "/snippets/delete/" (snippet.id) "/" } { "delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    layout(viewer, heading, content)
}

/// Single snippet; `highlighted` must already be safe HTML
pub fn snippet_page(viewer: &Viewer, snippet: &Snippet, highlighted: &str) -> Markup {
    let content = html! {
        p.meta {
            a href=(language_url(&snippet.language)) { (snippet.language.name) }
            " by "
            a href=(user_url(&snippet.owner.username)) { (snippet.owner.username) }
            " "
            (visibility_badge(snippet))
        }
        @if !snippet.description.is_empty() {
            p.description { (snippet.description) }
        }
        div.code { (PreEscaped(highlighted)) }
        @if viewer.is(&snippet.owner.username) {
            p {
                a href={ "/snippets/edit/" (snippet.id) "/" } { "Edit" }
                " "
                a href={ "/snippets/delete/" (snippet.id) "/" } { "Delete" }
            }
        }
    };
    layout(viewer, &snippet.name, content)
}

/// Which form is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { snippet_id: i64 },
}

impl FormMode {
    fn action(&self) -> String {
        match self {
            FormMode::Create => "/snippets/add/".to_string(),
            FormMode::Edit { snippet_id } => format!("/snippets/edit/{}/", snippet_id),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "New snippet",
            FormMode::Edit { .. } => "Edit snippet",
        }
    }
}

fn field_errors(errors: &[FieldError], field: &str) -> Markup {
    html! {
        @for error in errors.iter().filter(|e| e.field == field) {
            p.errors { (error.message) }
        }
    }
}

/// Create/edit form, refilled from `draft`
pub fn snippet_form(
    viewer: &Viewer,
    mode: FormMode,
    draft: &SnippetDraft,
    languages: &[Language],
    errors: &[FieldError],
) -> Markup {
    let content = html! {
        form method="post" action=(mode.action()) {
            p {
                label for="name" { "Name" }
                br;
                input id="name" type="text" name="name" value=(draft.name);
                (field_errors(errors, "name"))
            }
            p {
                label for="description" { "Description" }
                br;
                input id="description" type="text" name="description" value=(draft.description);
                (field_errors(errors, "description"))
            }
            p {
                label for="language" { "Language" }
                br;
                select id="language" name="language" {
                    option value="" { "---------" }
                    @for language in languages {
                        option value=(language.slug) selected[language.slug == draft.language_slug] {
                            (language.name)
                        }
                    }
                }
                (field_errors(errors, "language"))
            }
            p {
                label {
                    input type="checkbox" name="public" value="on" checked[draft.public];
                    " Public"
                }
            }
            p {
                label for="code" { "Code" }
                br;
                textarea id="code" name="code" rows="16" cols="80" { (draft.body) }
                (field_errors(errors, "code"))
            }
            button type="submit" { "Save" }
        }
    };
    layout(viewer, mode.title(), content)
}

/// Deleting happens only through the POST this page submits
pub fn delete_confirm_page(viewer: &Viewer, snippet: &Snippet) -> Markup {
    let content = html! {
        p { "Delete \"" (snippet.name) "\"? This cannot be undone." }
        form method="post" action={ "/snippets/delete/" (snippet.id) "/" } {
            button type="submit" { "Delete" }
            " "
            a href=(snippet_url(snippet)) { "Cancel" }
        }
    };
    layout(viewer, "Delete snippet", content)
}

pub fn login_page(username: &str, error: Option<&str>) -> Markup {
    let content = html! {
        @if let Some(error) = error {
            p.errors { (error) }
        }
        form method="post" action="/login/" {
            p {
                label for="username" { "Username" }
                br;
                input id="username" type="text" name="username" value=(username);
            }
            p {
                label for="password" { "Password" }
                br;
                input id="password" type="password" name="password";
            }
            button type="submit" { "Log in" }
        }
    };
    layout(&Viewer::Anonymous, "Log in", content)
}

pub fn error_page(message: &str) -> Markup {
    layout(&Viewer::Anonymous, "Error", html! { p { (message) } })
}
