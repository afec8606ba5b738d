use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use omnichat_shared::records::RequestType;

use crate::auth::use_auth;
use crate::components::icons::RefreshCw;
use crate::components::toast::{Notice, Toast};
use crate::resources::{
    Row, RowAction, Table, accepts_new_requests, load_table, perform, request_draft,
    submit_request, takes_review_notes,
};
use crate::web::route::AppRoute;

/// 资源列表页。审批页带审批意见输入框，"我的申请"页带新建表单。
#[component]
pub fn RecordsPage(route: AppRoute) -> impl IntoView {
    let auth = use_auth();

    let (table, set_table) = signal(Table::default());
    let (loading, set_loading) = signal(true);
    let (busy, set_busy) = signal(false);
    let (notes, set_notes) = signal(String::new());
    let (notification, set_notification) = signal(Option::<Notice>::None);

    let load = move || {
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            match load_table(&api, route).await {
                Ok(data) => set_table.set(data),
                Err(e) => {
                    warn!("{} failed to load: {}", route, e);
                    let text = format!("Could not load {}: {}", route.title().to_lowercase(), e);
                    set_notification.set(Some(Notice::error(text)));
                }
            }
            set_loading.set(false);
        });
    };

    // 行内操作完成后重新加载表格
    let run = move |action: RowAction, id: i64| {
        if busy.get_untracked() {
            return;
        }
        let review_notes = takes_review_notes(route).then(|| notes.get_untracked());
        let api = auth.api();
        set_busy.set(true);
        spawn_local(async move {
            match perform(&api, action, id, review_notes).await {
                Ok(ack) => {
                    set_notes.set(String::new());
                    set_notification.set(Some(Notice::success(ack.message)));
                    load();
                }
                Err(e) => {
                    warn!("{:?} on #{} failed: {}", action, id, e);
                    let text = format!("{} failed: {}", action.label(), e);
                    set_notification.set(Some(Notice::error(text)));
                }
            }
            set_busy.set(false);
        });
    };

    load();

    let placeholder = move || {
        let text = if loading.get() { "Loading..." } else { "Nothing to show yet." };
        let width = table
            .with(|t| t.headers.len() + usize::from(t.has_actions()))
            .max(1)
            .to_string();
        view! {
            <tr>
                <td colspan=width class="text-center py-8 text-base-content/50">{text}</td>
            </tr>
        }
    };

    let render_row = move |row: Row, with_actions: bool| {
        let id = row.id;
        let buttons = with_actions.then(|| {
            let buttons = row
                .actions
                .into_iter()
                .map(|action| {
                    let class = if action.is_destructive() {
                        "btn btn-xs btn-error btn-outline"
                    } else {
                        "btn btn-xs btn-primary"
                    };
                    view! {
                        <button
                            class=class
                            disabled=move || busy.get()
                            on:click=move |_| run(action, id)
                        >
                            {action.label()}
                        </button>
                    }
                })
                .collect_view();
            view! { <td class="flex gap-2">{buttons}</td> }
        });
        view! {
            <tr>
                {row.cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                {buttons}
            </tr>
        }
    };

    view! {
        <Toast notice=notification set_notice=set_notification />

        <Show when=move || accepts_new_requests(route)>
            <NewRequestForm
                set_notification=set_notification
                on_created=Callback::new(move |_| load())
            />
        </Show>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <h3 class="card-title">{route.title()}</h3>
                    <button
                        on:click=move |_| load()
                        disabled=move || loading.get()
                        class="btn btn-ghost btn-circle"
                    >
                        <RefreshCw spinning=loading />
                    </button>
                </div>

                <Show when=move || takes_review_notes(route)>
                    <div class="px-6 pb-2">
                        <input
                            type="text"
                            placeholder="Review notes (optional)"
                            on:input=move |ev| set_notes.set(event_target_value(&ev))
                            prop:value=notes
                            class="input input-bordered input-sm w-full max-w-md"
                        />
                    </div>
                </Show>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                {move || {
                                    table
                                        .with(|t| t.headers.clone())
                                        .into_iter()
                                        .map(|h| view! { <th>{h}</th> })
                                        .collect_view()
                                }}
                                <Show when=move || table.with(Table::has_actions)>
                                    <th>"Actions"</th>
                                </Show>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                if table.with(Table::is_empty) {
                                    placeholder().into_any()
                                } else {
                                    let (rows, with_actions) =
                                        table.with(|t| (t.rows.clone(), t.has_actions()));
                                    rows.into_iter()
                                        .map(|row| render_row(row, with_actions))
                                        .collect_view()
                                        .into_any()
                                }
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

/// 新建申请表单。提交成功后回调 `on_created`。
#[component]
fn NewRequestForm(
    set_notification: WriteSignal<Option<Notice>>,
    on_created: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();

    let (kind, set_kind) = signal(RequestType::Leave.as_str().to_string());
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        // 1. 本地校验
        let draft = match request_draft(
            &kind.get_untracked(),
            &title.get_untracked(),
            &description.get_untracked(),
        ) {
            Ok(draft) => draft,
            Err(msg) => {
                set_notification.set(Some(Notice::error(msg)));
                return;
            }
        };

        // 2. 提交并刷新列表
        let api = auth.api();
        set_is_submitting.set(true);
        spawn_local(async move {
            match submit_request(&api, &draft).await {
                Ok(_) => {
                    set_title.set(String::new());
                    set_description.set(String::new());
                    set_notification.set(Some(Notice::success("Request submitted")));
                    on_created.run(());
                }
                Err(e) => {
                    warn!("request submission failed: {}", e);
                    let text = format!("Could not submit request: {}", e);
                    set_notification.set(Some(Notice::error(text)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl mb-6">
            <form class="card-body gap-3" on:submit=on_submit>
                <h3 class="card-title">"New request"</h3>
                <select
                    class="select select-bordered w-full max-w-xs"
                    on:change=move |ev| set_kind.set(event_target_value(&ev))
                    prop:value=kind
                >
                    {RequestType::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Title"
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    prop:value=title
                    class="input input-bordered w-full"
                    required
                />
                <textarea
                    placeholder="Description (optional)"
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    prop:value=description
                    class="textarea textarea-bordered w-full"
                ></textarea>
                <div class="card-actions justify-end">
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || is_submitting.get()
                    >
                        {move || if is_submitting.get() { "Submitting..." } else { "Submit" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
