//! Landing page component
//!
//! Marketing page for the studio featuring:
//! - SEO meta tags
//! - Header that hides on scroll down and returns on scroll up
//! - Animated hero: heading entrance, typed headline with a cycling
//!   highlighted word, and a decorative pointer that walks to the CTA
//! - Services, work and process sections revealed on scroll
//! - Contact call-to-action and footer

use leptos::prelude::*;
use leptos_meta::{Link, Meta, Title};

use crate::core::HeroScript;
use crate::core::hero::anchors;
use crate::core::scroll::HeaderVisibility;
use crate::core::stage::Presentation;
use crate::ui::motion::{HERO_ROOT_ID, MEASURE_ID};

/// Landing page with the hero animation and scroll reveals
#[component]
pub fn LandingPage() -> impl IntoView {
    let presentation = RwSignal::new(HeroScript::default().resting_view().unwrap_or_default());
    let header = RwSignal::new(HeaderVisibility::Shown);

    #[cfg(feature = "hydrate")]
    let motion = crate::ui::motion::motion_handle();

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| crate::ui::motion::install(motion, presentation, header));

    let on_replay = Callback::new(move |_: ()| {
        #[cfg(feature = "hydrate")]
        crate::ui::motion::replay(motion);
    });

    view! {
        <SeoMeta />

        <div class="landing">
            <Header header=header />
            <Hero presentation=presentation on_replay=on_replay />

            // Services
            <section id="services" class="reveal-section landing-section">
                <div class="landing-container">
                    <h2 class="landing-section-title">"What we do"</h2>
                    <p class="landing-section-lead">
                        "Small senior team, end to end: from the first sketch to the shipped product."
                    </p>
                    <div class="landing-grid">
                        <ServiceCard
                            title="Brand & identity"
                            description="Naming, logo systems and visual language that hold up across every surface."
                        />
                        <ServiceCard
                            title="Product design"
                            description="Flows, interfaces and prototypes tested with real users before a line of code."
                        />
                        <ServiceCard
                            title="Web development"
                            description="Fast, accessible sites and apps built to be maintained, not rewritten."
                        />
                    </div>
                </div>
            </section>

            // Selected work
            <section id="work" class="reveal-section landing-section landing-section-alt">
                <div class="landing-container">
                    <h2 class="landing-section-title">"Selected work"</h2>
                    <div class="landing-grid">
                        <WorkCard client="Northwind" result="+38% trial sign-ups after the redesign" />
                        <WorkCard client="Lumen Health" result="Patient portal rebuilt in twelve weeks" />
                        <WorkCard client="Atlas Freight" result="One design system for five products" />
                    </div>
                </div>
            </section>

            // Process
            <section id="process" class="reveal-section landing-section">
                <div class="landing-container">
                    <h2 class="landing-section-title">"How we work"</h2>
                    <ol class="landing-steps">
                        <ProcessStep number="01" title="Discover" text="Workshops, audits and interviews to find what matters." />
                        <ProcessStep number="02" title="Design" text="Weekly reviews of working prototypes, not slide decks." />
                        <ProcessStep number="03" title="Build" text="Production code delivered in small, shippable increments." />
                        <ProcessStep number="04" title="Grow" text="Measure, learn and iterate after launch." />
                    </ol>
                </div>
            </section>

            // Contact
            <section id="contact" class="reveal-section landing-section landing-section-alt">
                <div class="landing-container landing-center">
                    <h2 class="landing-section-title">"Have a project in mind?"</h2>
                    <p class="landing-section-lead">"Tell us about it. We reply within one business day."</p>
                    <a href="mailto:hello@heropage.studio" class="landing-btn-primary">
                        "Start a project"
                    </a>
                </div>
            </section>

            <Footer />
        </div>

        <LandingStyles />
    }
}

/// SEO Meta tags component using leptos_meta
#[component]
fn SeoMeta() -> impl IntoView {
    view! {
        <Title text="Heropage - Design & development studio" />
        <Meta name="description" content="Designs that impress, convert, inspire and scale. Brand, product design and web development from a small senior team." />

        // Open Graph
        <Meta property="og:type" content="website" />
        <Meta property="og:title" content="Heropage - Design & development studio" />
        <Meta property="og:description" content="Designs that impress, convert, inspire and scale." />

        <Link rel="canonical" href="/" />
    }
}

/// Fixed header toggled by scroll direction below the hero
#[component]
fn Header(header: RwSignal<HeaderVisibility>) -> impl IntoView {
    view! {
        <header
            id="site-header"
            class=move || format!("site-header {}", header.get().class_name())
        >
            <div class="landing-container site-header-inner">
                <a href="/" class="site-logo">"Heropage"</a>
                <nav class="site-nav">
                    <a href="#services">"Services"</a>
                    <a href="#work">"Work"</a>
                    <a href="#process">"Process"</a>
                    <a href="#contact" class="site-nav-cta">"Contact"</a>
                </nav>
            </div>
        </header>
    }
}

/// Hero section rendered from the current [`Presentation`]
#[component]
fn Hero(presentation: RwSignal<Presentation>, on_replay: Callback<()>) -> impl IntoView {
    let heading_transform =
        move || presentation.with(|p| format!("translateX({}px)", p.heading.offset_x));
    let heading_opacity = move || presentation.with(|p| p.heading.opacity.to_string());
    let heading_filter = move || presentation.with(|p| format!("blur({}px)", p.heading.blur));

    let cta_transform = move || presentation.with(|p| format!("scale({})", p.cta.scale));
    let cta_shadow = move || {
        presentation.with(|p| {
            format!(
                "0 0 0 {}px rgba(99, 102, 241, {})",
                (p.cta.glow * 12.0).round(),
                0.35 * p.cta.glow
            )
        })
    };

    view! {
        <section id=HERO_ROOT_ID class="hero">
            // Cursor stops, invisible
            <span id=anchors::POINT_A class="hero-anchor" style="left: 14%; top: 70%;" aria-hidden="true"></span>
            <span id=anchors::POINT_B class="hero-anchor" style="left: 62%; top: 26%;" aria-hidden="true"></span>
            <span id=anchors::POINT_C class="hero-anchor" style="left: 84%; top: 58%;" aria-hidden="true"></span>
            <span id=anchors::VIA_1 class="hero-anchor" style="left: 34%; top: 38%;" aria-hidden="true"></span>
            <span id=anchors::VIA_2 class="hero-anchor" style="left: 72%; top: 84%;" aria-hidden="true"></span>

            <div class="hero-content">
                <h1
                    class="hero-heading"
                    style:transform=heading_transform
                    style:opacity=heading_opacity
                    style:filter=heading_filter
                >
                    <HeroHeadline presentation=presentation />
                    <span id=MEASURE_ID class="hero-measure" aria-hidden="true"></span>
                </h1>

                <p class="hero-tagline">
                    "We are a design and development studio helping teams launch products people remember."
                </p>

                <div class="hero-actions">
                    <a
                        href="#contact"
                        class="landing-btn-primary hero-cta"
                        style:transform=cta_transform
                        style:box-shadow=cta_shadow
                    >
                        "Start a project"
                        <span id=anchors::POINT_D class="hero-anchor hero-anchor-inline" aria-hidden="true"></span>
                    </a>
                    <button
                        class="landing-btn-secondary"
                        on:click=move |_| on_replay.run(())
                        aria-label="Replay the hero animation"
                    >
                        "Replay"
                    </button>
                </div>
            </div>

            <HeroPointer presentation=presentation />
        </section>
    }
}

/// Typed text while typing, then static prefix plus highlighted word
#[component]
fn HeroHeadline(presentation: RwSignal<Presentation>) -> impl IntoView {
    move || {
        presentation.with(|p| {
            let headline = &p.headline;
            if headline.typing_done {
                let width = format!("{}px", p.highlight.width);
                let opacity = p.highlight.opacity.to_string();
                view! {
                    <span>{headline.prefix.clone()}</span>
                    <span class="hero-word">
                        <span
                            class="hero-highlight"
                            style:width=width
                            style:opacity=opacity
                            aria-hidden="true"
                        ></span>
                        <span class="hero-word-text">{headline.word.clone()}</span>
                    </span>
                }
                .into_any()
            } else {
                view! {
                    <span>{headline.typed.clone()}</span>
                    <span class="hero-caret" aria-hidden="true"></span>
                }
                .into_any()
            }
        })
    }
}

/// Decorative pointer following the cursor state
#[component]
fn HeroPointer(presentation: RwSignal<Presentation>) -> impl IntoView {
    let transform = move || {
        presentation.with(|p| {
            let cursor = &p.cursor;
            format!(
                "translate({}px, {}px) scale({})",
                cursor.position.x, cursor.position.y, cursor.scale
            )
        })
    };
    let opacity = move || presentation.with(|p| p.cursor.opacity.to_string());

    view! {
        <div class="hero-pointer" style:transform=transform style:opacity=opacity aria-hidden="true">
            <svg width="24" height="24" viewBox="0 0 24 24" fill="none">
                <path
                    d="M5.5 3.21V20.8c0 .45.54.67.85.35l4.86-4.86a.5.5 0 01.35-.15h6.87c.45 0 .67-.54.35-.85L6.35 2.86a.5.5 0 00-.85.35z"
                    fill="#111827"
                    stroke="white"
                    stroke-width="1.5"
                />
            </svg>
        </div>
    }
}

#[component]
fn ServiceCard(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <div class="landing-card">
            <h3 class="landing-card-title">{title}</h3>
            <p class="landing-card-text">{description}</p>
        </div>
    }
}

#[component]
fn WorkCard(client: &'static str, result: &'static str) -> impl IntoView {
    view! {
        <div class="landing-card landing-work-card">
            <span class="landing-work-client">{client}</span>
            <p class="landing-card-text">{result}</p>
        </div>
    }
}

#[component]
fn ProcessStep(number: &'static str, title: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <li class="landing-step">
            <span class="landing-step-number">{number}</span>
            <h3 class="landing-card-title">{title}</h3>
            <p class="landing-card-text">{text}</p>
        </li>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="landing-footer">
            <div class="landing-container site-header-inner">
                <span>"© 2025 Heropage studio"</span>
                <a href="mailto:hello@heropage.studio">"hello@heropage.studio"</a>
            </div>
        </footer>
    }
}

/// CSS for the landing page and hero animation targets
#[component]
fn LandingStyles() -> impl IntoView {
    view! {
        <style>
            r#"
            .landing {
                min-height: 100vh;
                overflow-x: hidden;
                font-family: Inter, system-ui, -apple-system, sans-serif;
                color: #111827;
                background: #fafafa;
            }
            .landing-container {
                max-width: 72rem;
                margin: 0 auto;
                padding: 0 1.5rem;
            }
            .landing-center { text-align: center; }

            /* Header */
            .site-header {
                position: fixed;
                top: 0;
                left: 0;
                right: 0;
                z-index: 50;
                background: rgba(250, 250, 250, 0.85);
                backdrop-filter: blur(12px);
                border-bottom: 1px solid rgba(17, 24, 39, 0.06);
                transition: transform 0.3s ease;
            }
            .site-header.header-hidden { transform: translateY(-100%); }
            .site-header.header-visible { transform: translateY(0); }
            .site-header-inner {
                display: flex;
                align-items: center;
                justify-content: space-between;
                height: 4rem;
            }
            .site-logo { font-weight: 700; font-size: 1.25rem; color: inherit; text-decoration: none; }
            .site-nav { display: flex; gap: 1.5rem; align-items: center; }
            .site-nav a { color: #4b5563; text-decoration: none; font-size: 0.875rem; font-weight: 500; }
            .site-nav a:hover { color: #111827; }
            .site-nav .site-nav-cta { color: #4f46e5; }

            /* Hero */
            .hero {
                position: relative;
                min-height: 100vh;
                display: flex;
                align-items: center;
                justify-content: center;
                padding-top: 4rem;
                overflow: hidden;
            }
            .hero-content { position: relative; z-index: 1; text-align: center; max-width: 56rem; padding: 0 1rem; }
            .hero-heading {
                position: relative;
                font-size: clamp(2.5rem, 7vw, 5rem);
                font-weight: 800;
                letter-spacing: -0.03em;
                line-height: 1.1;
                margin: 0 0 1.5rem;
                min-height: 1.1em;
                will-change: transform, opacity, filter;
            }
            .hero-word { position: relative; display: inline-block; white-space: nowrap; }
            .hero-word-text { position: relative; }
            .hero-highlight {
                position: absolute;
                left: 0;
                bottom: 0.08em;
                height: 0.42em;
                background: #c7d2fe;
                border-radius: 0.15em;
                z-index: 0;
            }
            .hero-caret {
                display: inline-block;
                width: 0.06em;
                height: 0.9em;
                margin-left: 0.05em;
                vertical-align: -0.05em;
                background: currentColor;
                animation: hero-caret-blink 1s steps(1) infinite;
            }
            @keyframes hero-caret-blink { 50% { opacity: 0; } }
            .hero-measure {
                position: absolute;
                visibility: hidden;
                white-space: nowrap;
                pointer-events: none;
                left: 0;
                top: 0;
            }
            .hero-tagline { font-size: 1.25rem; color: #4b5563; max-width: 40rem; margin: 0 auto 2.5rem; line-height: 1.6; }
            .hero-actions { display: flex; gap: 1rem; justify-content: center; flex-wrap: wrap; }
            .hero-cta { position: relative; }
            .hero-anchor {
                position: absolute;
                width: 2px;
                height: 2px;
                pointer-events: none;
            }
            .hero-anchor-inline { left: 70%; top: 60%; }
            .hero-pointer {
                position: absolute;
                top: 0;
                left: 0;
                z-index: 2;
                pointer-events: none;
                transform-origin: 0 0;
                will-change: transform, opacity;
            }

            /* Buttons */
            .landing-btn-primary {
                display: inline-block;
                padding: 1rem 2rem;
                font-weight: 600;
                font-size: 1.125rem;
                color: white;
                background-color: #4f46e5;
                border-radius: 0.75rem;
                text-decoration: none;
                box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1);
            }
            .landing-btn-secondary {
                padding: 1rem 2rem;
                font-weight: 600;
                font-size: 1.125rem;
                border: 2px solid #d1d5db;
                border-radius: 0.75rem;
                background-color: white;
                color: #374151;
                cursor: pointer;
            }

            /* Sections */
            .landing-section { padding: 6rem 0; }
            .landing-section-alt { background: #f3f4f6; }
            .landing-section-title { font-size: 2.25rem; font-weight: 700; margin: 0 0 1rem; }
            .landing-section-lead { font-size: 1.125rem; color: #4b5563; margin: 0 0 3rem; }
            .landing-grid { display: grid; gap: 2rem; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); }
            .landing-card { padding: 2rem; background: white; border-radius: 1rem; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.06); }
            .landing-card-title { font-size: 1.125rem; font-weight: 600; margin: 0 0 0.5rem; }
            .landing-card-text { color: #4b5563; line-height: 1.6; margin: 0; }
            .landing-work-client { display: block; font-size: 1.5rem; font-weight: 700; margin-bottom: 0.75rem; }
            .landing-steps { list-style: none; padding: 0; margin: 0; display: grid; gap: 2rem; grid-template-columns: repeat(auto-fit, minmax(13rem, 1fr)); }
            .landing-step-number { color: #4f46e5; font-weight: 700; }
            .landing-footer { padding: 2rem 0; color: #6b7280; font-size: 0.875rem; border-top: 1px solid #e5e7eb; }
            .landing-footer a { color: inherit; }

            /* Scroll reveal */
            .reveal-section {
                opacity: 0;
                transform: translateY(30px);
                transition: opacity 0.8s ease-out, transform 0.8s ease-out;
            }
            .reveal-section.visible {
                opacity: 1;
                transform: translateY(0);
            }

            @media (prefers-reduced-motion: reduce) {
                .reveal-section { opacity: 1; transform: none; transition: none; }
                .hero-caret { animation: none; }
            }
            "#
        </style>
    }
}
