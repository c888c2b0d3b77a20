//! Not found page component
//!
//! A 404 page for any path other than the landing page.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Page not found - Heropage" />

        <div class="not-found">
            <div class="not-found-body">
                // Error code
                <h1 class="not-found-code">"404"</h1>

                <h2 class="not-found-title">"Page Not Found"</h2>

                <p class="not-found-text">
                    "The page you're looking for doesn't exist or has been moved."
                </p>

                <A href="/" attr:class="not-found-home">
                    "Go Home"
                </A>
            </div>

            <style>
                r#"
                .not-found {
                    min-height: 100vh;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    padding: 1rem;
                    font-family: Inter, system-ui, -apple-system, sans-serif;
                    background: #fafafa;
                    color: #111827;
                }
                .not-found-body { text-align: center; }
                .not-found-code { font-size: 3.75rem; font-weight: 700; margin: 0 0 1rem; }
                .not-found-title { font-size: 1.5rem; font-weight: 600; margin: 0 0 0.5rem; }
                .not-found-text { color: #4b5563; margin: 0 auto 2rem; max-width: 28rem; }
                .not-found-home {
                    display: inline-block;
                    padding: 0.75rem 1.5rem;
                    color: white;
                    background: #4f46e5;
                    border-radius: 0.5rem;
                    font-weight: 500;
                    text-decoration: none;
                }
                "#
            </style>
        </div>
    }
}
