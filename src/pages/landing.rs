use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    Separator,
};
use crate::state::AppContext;
use crate::util::page_origin;
use leptos::prelude::*;

const FEATURES: [(&str, &str); 3] = [
    (
        "Real-time Sync",
        "Changes reflect instantly across all your devices and tabs.",
    ),
    (
        "Private & Secure",
        "Your links are only readable by you, behind your Google sign-in.",
    ),
    (
        "Clean Interface",
        "A distraction-free dashboard designed for focus and speed.",
    ),
];

const TESTIMONIALS: [(&str, &str); 3] = [
    ("Alex Johnson", "Software Engineer"),
    ("Sarah Chen", "UI Designer"),
    ("Mike Ross", "Researcher"),
];

#[component]
fn Brand(#[prop(optional)] dark: bool) -> impl IntoView {
    let name_class = if dark {
        "text-xl font-bold text-white"
    } else {
        "text-xl font-bold text-blue-600"
    };

    view! {
        <div class="flex items-center gap-2">
            <div class="flex h-8 w-8 items-center justify-center rounded-lg bg-blue-600 font-bold text-white">
                "SB"
            </div>
            <span class=name_class>"SmartBookmark"</span>
        </div>
    }
}

/// Public marketing page. Every call to action starts OAuth sign-in with the
/// dashboard as the post-login target.
#[component]
pub fn LandingPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;

    let start_sign_in = move || {
        let Some(origin) = page_origin() else {
            leptos::logging::error!("cannot start sign-in: page origin unavailable");
            return;
        };

        let target = api_client.with_untracked(|c| c.authorize_url(&format!("{origin}/dashboard")));
        if let Err(e) = window().location().set_href(&target) {
            leptos::logging::error!("sign-in redirect failed: {:?}", e);
        }
    };

    view! {
        <div class="flex min-h-screen flex-col scroll-smooth bg-white font-sans text-gray-900">
            <nav class="fixed z-50 w-full border-b border-gray-100 bg-white/80 backdrop-blur-md">
                <div class="mx-auto flex h-16 max-w-7xl items-center justify-between px-4 sm:px-6 lg:px-8">
                    <Brand />
                    <div class="hidden space-x-8 md:flex">
                        <a href="#" class="text-gray-600 transition hover:text-blue-600">"Home"</a>
                        <a href="#features" class="text-gray-600 transition hover:text-blue-600">"Features"</a>
                        <a href="#testimonials" class="text-gray-600 transition hover:text-blue-600">"Testimonials"</a>
                        <a href="#contact" class="text-gray-600 transition hover:text-blue-600">"Contact Us"</a>
                    </div>
                    <Button
                        class="rounded-full bg-blue-600 px-5 text-white hover:bg-blue-700"
                        on:click=move |_| start_sign_in()
                    >
                        "Login"
                    </Button>
                </div>
            </nav>

            <section class="bg-gradient-to-b from-blue-50 to-white px-4 pb-20 pt-32 sm:px-6 lg:px-8">
                <div class="mx-auto max-w-7xl text-center">
                    <h1 class="mb-6 text-5xl font-extrabold tracking-tight md:text-6xl">
                        "Organize your web, "
                        <br />
                        <span class="text-blue-600">"Supercharge your productivity."</span>
                    </h1>
                    <p class="mx-auto mb-10 max-w-2xl text-xl text-gray-600">
                        "The minimal bookmark manager for teams and individuals. Access your links anywhere, instantly."
                    </p>
                    <div class="flex justify-center gap-4">
                        <Button
                            size=ButtonSize::Lg
                            class="bg-blue-600 text-white shadow-xl hover:bg-blue-700"
                            on:click=move |_| start_sign_in()
                        >
                            "Get Started Free"
                            <svg
                                xmlns="http://www.w3.org/2000/svg"
                                width="20"
                                height="20"
                                viewBox="0 0 24 24"
                                fill="none"
                                stroke="currentColor"
                                stroke-width="2"
                                stroke-linecap="round"
                                stroke-linejoin="round"
                                aria-hidden="true"
                            >
                                <path d="M5 12h14" />
                                <path d="m12 5 7 7-7 7" />
                            </svg>
                        </Button>
                        <Button
                            variant=ButtonVariant::Secondary
                            size=ButtonSize::Lg
                            href="#features"
                        >
                            "View Demo"
                        </Button>
                    </div>
                </div>
            </section>

            <section id="features" class="bg-white py-20">
                <div class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8">
                    <div class="mb-16 text-center">
                        <h2 class="text-3xl font-bold">"Why choose SmartBookmark?"</h2>
                        <p class="mt-4 text-gray-500">"Everything you need to manage your digital footprint."</p>
                    </div>
                    <div class="grid gap-10 md:grid-cols-3">
                        {FEATURES
                            .into_iter()
                            .map(|(title, desc)| {
                                view! {
                                    <Card class="border-gray-100 bg-gray-50 transition hover:shadow-lg">
                                        <CardHeader>
                                            <CardTitle class="text-xl">{title}</CardTitle>
                                        </CardHeader>
                                        <CardContent>
                                            <CardDescription class="leading-relaxed">{desc}</CardDescription>
                                        </CardContent>
                                    </Card>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>

            <section id="testimonials" class="bg-blue-900 py-20 text-white">
                <div class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8">
                    <h2 class="mb-16 text-center text-3xl font-bold">"Loved by developers"</h2>
                    <div class="grid gap-8 md:grid-cols-3">
                        {TESTIMONIALS
                            .into_iter()
                            .map(|(name, role)| {
                                view! {
                                    <div class="rounded-xl border border-blue-700 bg-blue-800/50 p-6">
                                        <div class="mb-4 text-yellow-400">"★★★★★"</div>
                                        <p class="mb-6 text-blue-100">
                                            "\"This app completely changed how I organize my research.\""
                                        </p>
                                        <p class="font-semibold">{name}</p>
                                        <p class="text-sm text-blue-300">{role}</p>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>

            <footer id="contact" class="bg-gray-900 pb-10 pt-20 text-gray-300">
                <div class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8">
                    <div class="mb-16 grid grid-cols-1 gap-12 md:grid-cols-2 lg:grid-cols-4">
                        <div class="space-y-6">
                            <Brand dark=true />
                            <p class="text-sm leading-relaxed text-gray-400">
                                "Organize your digital life with an intuitive bookmarking tool built for speed and security."
                            </p>
                        </div>
                        <div>
                            <h4 class="mb-6 text-xs font-bold uppercase tracking-widest text-white">"Product"</h4>
                            <ul class="space-y-4 text-sm">
                                <li><a href="#features" class="transition hover:text-blue-500">"Features"</a></li>
                                <li><a href="#testimonials" class="transition hover:text-blue-500">"Testimonials"</a></li>
                            </ul>
                        </div>
                        <div>
                            <h4 class="mb-6 text-xs font-bold uppercase tracking-widest text-white">"Resources"</h4>
                            <ul class="space-y-4 text-sm">
                                <li><a href="#" class="transition hover:text-blue-500">"Help Center"</a></li>
                                <li><a href="#" class="transition hover:text-blue-500">"Privacy Policy"</a></li>
                            </ul>
                        </div>
                        <div>
                            <h4 class="mb-6 text-xs font-bold uppercase tracking-widest text-white">"Contact"</h4>
                            <ul class="space-y-4 text-sm">
                                <li>
                                    <a href="mailto:hello@smartbookmark.app" class="transition hover:text-white">
                                        "hello@smartbookmark.app"
                                    </a>
                                </li>
                            </ul>
                        </div>
                    </div>

                    <Separator class="bg-gray-800" />

                    <div class="flex flex-col items-center justify-between gap-4 pt-8 text-xs text-gray-500 md:flex-row">
                        <p>"© SmartBookmark. All rights reserved."</p>
                        <div class="flex gap-6">
                            <a href="#" class="hover:text-gray-300">"Terms of Service"</a>
                            <a href="#" class="hover:text-gray-300">"Cookie Policy"</a>
                        </div>
                    </div>
                </div>
            </footer>
        </div>
    }
}
