use crate::api::ApiClient;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::models::Bookmark;
use crate::search::filter_bookmarks;
use crate::state::{
    apply_create_result, apply_delete_result, apply_load_result, apply_resolved_session,
    apply_update_result, remove_optimistic, resolve_session, AppContext, BookmarkFormController,
    FormCommand, Followup, DELETE_CONFIRMATION,
};
use crate::util::{confirm, created_date};
use icons::X;
use leptos::ev;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::use_navigate;

#[component]
fn EditIcon() -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width="16"
            height="16"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            <path d="M12 20h9" />
            <path d="M16.5 3.5a2.121 2.121 0 0 1 3 3L7 19l-4 1 1-4Z" />
        </svg>
    }
}

#[component]
fn TrashIcon() -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width="16"
            height="16"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            <path d="M3 6h18" />
            <path d="M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6" />
            <path d="M8 6V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2" />
        </svg>
    }
}

/// Add/edit dialog. All state lives in `form`; the page owns the write.
#[component]
fn BookmarkFormModal(form: BookmarkFormController, on_submit: Callback<()>) -> impl IntoView {
    let dismiss = move || {
        if !form.loading.get_untracked() {
            form.close();
        }
    };

    view! {
        <Show when=move || form.open.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
                <div class="absolute inset-0 bg-black/40" on:click=move |_| dismiss() />
                <div
                    class="relative w-full max-w-md rounded-xl border border-border bg-background p-6 shadow-xl"
                    role="dialog"
                    aria-modal="true"
                >
                    <div class="mb-4 flex items-center justify-between">
                        <h2 class="text-lg font-semibold">{move || form.heading()}</h2>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:aria-label="Close"
                            on:click=move |_| dismiss()
                        >
                            <X />
                        </Button>
                    </div>

                    <form
                        class="space-y-4"
                        on:submit=move |ev: ev::SubmitEvent| {
                            ev.prevent_default();
                            on_submit.run(());
                        }
                    >
                        <div class="space-y-2">
                            <Label html_for="bookmark-title">"Title"</Label>
                            <Input
                                id="bookmark-title"
                                placeholder="e.g. Rust Documentation"
                                required=true
                                autofocus=true
                                bind_value=form.title
                            />
                        </div>
                        <div class="space-y-2">
                            <Label html_for="bookmark-url">"URL"</Label>
                            <Input
                                id="bookmark-url"
                                r#type="url"
                                placeholder="https://..."
                                required=true
                                bind_value=form.url
                            />
                        </div>

                        <Show when=move || form.error.get().is_some() fallback=|| ().into_view()>
                            <Alert class="border-destructive/50 text-destructive">
                                <AlertDescription>
                                    {move || form.error.get().unwrap_or_default()}
                                </AlertDescription>
                            </Alert>
                        </Show>

                        <div class="flex justify-end gap-2">
                            <Button
                                variant=ButtonVariant::Outline
                                attr:disabled=move || form.loading.get()
                                on:click=move |ev: ev::MouseEvent| {
                                    // Default button type inside a form is submit.
                                    ev.prevent_default();
                                    dismiss();
                                }
                            >
                                "Cancel"
                            </Button>
                            <Button
                                attr:disabled=move || form.loading.get()
                                class="bg-blue-600 text-white hover:bg-blue-700"
                            >
                                <Show when=move || form.loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || form.submit_label()}
                            </Button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let api_client = app_state.api_client;
    let current_user = app_state.current_user;
    let bookmarks = app_state.bookmarks;
    let loading = app_state.bookmarks_loading;
    let load_error = app_state.bookmarks_error;
    let search_query = app_state.search_query;

    let form = BookmarkFormController::new();
    let navigate = StoredValue::new(use_navigate());

    let go_home = move || {
        navigate.with_value(|nav| nav("/", Default::default()));
    };

    // Dead or missing session: drop everything local and leave.
    let end_session = move || {
        ApiClient::clear_storage();
        app_state.reset();
        go_home();
    };

    let follow = move |next: Followup| {
        if next == Followup::EndSession {
            end_session();
        }
    };

    let load_bookmarks = move || {
        if loading.get_untracked() {
            return;
        }
        loading.set(true);
        load_error.set(None);

        let epoch = app_state.epoch();
        let client = api_client.get_untracked();
        spawn_local(async move {
            let result = client.list_bookmarks().await;
            follow(apply_load_result(&app_state, epoch, result));
        });
    };

    Effect::new(move |_| {
        let epoch = app_state.epoch();
        let client = api_client.get_untracked();
        spawn_local(async move {
            let (client, user) = resolve_session(client).await;
            match apply_resolved_session(&app_state, epoch, client, user) {
                Followup::LoadBookmarks => load_bookmarks(),
                next => follow(next),
            }
        });
    });

    let filtered = Memo::new(move |_| {
        let query = search_query.get();
        bookmarks.with(|all| filter_bookmarks(all, &query))
    });

    let submit_form = move || {
        if form.loading.get_untracked() {
            return;
        }

        let user_id = current_user.with_untracked(|u| u.as_ref().map(|u| u.id.clone()));
        let command = match form.command(user_id.as_deref()) {
            Ok(command) => command,
            Err(e) => {
                form.error.set(Some(e.to_string()));
                return;
            }
        };

        form.loading.set(true);
        form.error.set(None);

        let epoch = app_state.epoch();
        let client = api_client.get_untracked();
        spawn_local(async move {
            let next = match command {
                FormCommand::Create(new) => {
                    let result = client.create_bookmark(&new).await;
                    apply_create_result(&app_state, &form, epoch, result)
                }
                FormCommand::Update { id, changes } => {
                    let result = client.update_bookmark(&id, &changes).await;
                    apply_update_result(&app_state, &form, epoch, &id, &changes, result)
                }
            };
            follow(next);
        });
    };

    let delete_bookmark = move |id: String| {
        if !confirm(DELETE_CONFIRMATION) {
            return;
        }

        let Some(removal) = bookmarks
            .try_update(|list| remove_optimistic(list, &id))
            .flatten()
        else {
            return;
        };
        load_error.set(None);

        let epoch = app_state.epoch();
        let client = api_client.get_untracked();
        spawn_local(async move {
            let result = client.delete_bookmark(&id).await;
            follow(apply_delete_result(&app_state, epoch, removal, result));
        });
    };

    let sign_out = move || {
        let client = api_client.get_untracked();
        spawn_local(async move {
            if let Err(e) = client.sign_out().await {
                warn!("sign-out request failed ({:?}): {}", e.kind, e);
            }
            end_session();
        });
    };

    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && form.open.get_untracked() && !form.loading.get_untracked() {
            form.close();
        }
    });
    on_cleanup(move || key_handle.remove());

    let rows = move || {
        filtered
            .get()
            .into_iter()
            .map(|bookmark: Bookmark| {
                let id = bookmark.id.clone();
                let for_edit = bookmark.clone();
                let href = bookmark.url.clone();
                let added = created_date(&bookmark.created_at).to_string();

                view! {
                    <tr class="border-b border-border last:border-0 hover:bg-surface-hover">
                        <td class="px-4 py-3 font-medium">{bookmark.title}</td>
                        <td class="max-w-xs truncate px-4 py-3">
                            <a
                                href=href
                                target="_blank"
                                rel="noopener noreferrer"
                                class="text-blue-600 hover:underline"
                            >
                                {bookmark.url}
                            </a>
                        </td>
                        <td class="px-4 py-3 text-muted-foreground">{added}</td>
                        <td class="px-4 py-3">
                            <div class="flex justify-end gap-1">
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    attr:aria-label="Edit bookmark"
                                    on:click=move |_| form.open_edit(&for_edit)
                                >
                                    <EditIcon />
                                </Button>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    class="text-destructive"
                                    attr:aria-label="Delete bookmark"
                                    on:click=move |_| delete_bookmark(id.clone())
                                >
                                    <TrashIcon />
                                </Button>
                            </div>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let empty_message = move || {
        if bookmarks.with(|b| b.is_empty()) {
            "No bookmarks yet. Add your first one."
        } else {
            "No bookmarks match your search."
        }
    };

    view! {
        <div class="min-h-screen bg-gray-50 text-gray-900">
            <header class="border-b border-gray-200 bg-white">
                <div class="mx-auto flex h-16 max-w-6xl items-center justify-between px-4">
                    <div class="flex items-center gap-2">
                        <div class="flex h-8 w-8 items-center justify-center rounded-lg bg-blue-600 font-bold text-white">
                            "SB"
                        </div>
                        <span class="text-lg font-semibold">"Dashboard"</span>
                    </div>
                    <div class="flex items-center gap-3">
                        <span class="hidden text-sm text-muted-foreground sm:inline">
                            {move || {
                                current_user
                                    .with(|u| u.as_ref().and_then(|u| u.email.clone()))
                                    .unwrap_or_default()
                            }}
                        </span>
                        <Button
                            class="bg-blue-600 text-white hover:bg-blue-700"
                            attr:disabled=move || current_user.with(|u| u.is_none())
                            on:click=move |_| form.open_create()
                        >
                            "+ Add Bookmark"
                        </Button>
                        <Button variant=ButtonVariant::Outline on:click=move |_| sign_out()>
                            "Sign out"
                        </Button>
                    </div>
                </div>
            </header>

            <main class="mx-auto max-w-6xl px-4 py-8">
                <Show
                    when=move || current_user.with(|u| u.is_some())
                    fallback=|| {
                        view! {
                            <div class="flex items-center justify-center gap-2 py-24 text-sm text-muted-foreground">
                                <Spinner />
                                "Loading..."
                            </div>
                        }
                    }
                >
                    <Card class="bg-white">
                        <CardHeader class="w-full">
                            <div class="flex w-full flex-col gap-4 sm:flex-row sm:items-center sm:justify-between">
                                <div class="space-y-1">
                                    <CardTitle class="text-xl">"My Bookmarks"</CardTitle>
                                    <CardDescription>
                                        {move || {
                                            let total = bookmarks.with(|b| b.len());
                                            if search_query.with(|q| q.trim().is_empty()) {
                                                format!("{total} saved")
                                            } else {
                                                format!("{} of {total}", filtered.with(|f| f.len()))
                                            }
                                        }}
                                    </CardDescription>
                                </div>
                                <Input
                                    class="sm:max-w-xs"
                                    r#type="search"
                                    placeholder="Prefix search..."
                                    bind_value=search_query
                                />
                            </div>
                        </CardHeader>
                        <CardContent>
                            <Show when=move || load_error.get().is_some() fallback=|| ().into_view()>
                                <Alert class="mb-4 flex items-center justify-between gap-4 border-destructive/50 text-destructive">
                                    <AlertDescription>
                                        {move || load_error.get().unwrap_or_default()}
                                    </AlertDescription>
                                    <Button
                                        variant=ButtonVariant::Outline
                                        size=ButtonSize::Sm
                                        on:click=move |_| load_bookmarks()
                                    >
                                        "Retry"
                                    </Button>
                                </Alert>
                            </Show>

                            <Show
                                when=move || !(loading.get() && bookmarks.with(|b| b.is_empty()))
                                fallback=|| {
                                    view! {
                                        <div class="flex justify-center py-12">
                                            <Spinner class="size-6" />
                                        </div>
                                    }
                                }
                            >
                                <Show
                                    when=move || filtered.with(|f| !f.is_empty())
                                    fallback=move || {
                                        view! {
                                            <div class="py-12 text-center text-sm text-muted-foreground">
                                                {empty_message}
                                            </div>
                                        }
                                    }
                                >
                                    <div class="overflow-x-auto">
                                        <table class="w-full text-left text-sm">
                                            <thead class="border-b border-border text-xs uppercase text-muted-foreground">
                                                <tr>
                                                    <th class="px-4 py-3">"Title"</th>
                                                    <th class="px-4 py-3">"URL"</th>
                                                    <th class="px-4 py-3">"Added"</th>
                                                    <th class="px-4 py-3 text-right">"Actions"</th>
                                                </tr>
                                            </thead>
                                            <tbody>{rows}</tbody>
                                        </table>
                                    </div>
                                </Show>
                            </Show>
                        </CardContent>
                    </Card>
                </Show>
            </main>

            <BookmarkFormModal form=form on_submit=Callback::new(move |_| submit_form()) />
        </div>
    }
}
