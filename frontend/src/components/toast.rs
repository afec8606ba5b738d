use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const DISMISS_AFTER_MS: u32 = 3_000;

/// 提示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }
}

/// 最多持有一个待触发的定时器，新定时器替换旧的。
/// 句柄被丢弃即取消 (`Timeout` 的 `Drop` 会清除浏览器定时器)。
pub(crate) struct DismissSlot<H> {
    pending: Option<H>,
}

impl<H> Default for DismissSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> DismissSlot<H> {
    pub(crate) fn arm(&mut self, handle: H) {
        self.pending = Some(handle);
    }

    pub(crate) fn disarm(&mut self) {
        self.pending = None;
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

/// 右上角提示，每条消息显示三秒。新消息会重新计时。
#[component]
pub fn Toast(
    notice: ReadSignal<Option<Notice>>,
    set_notice: WriteSignal<Option<Notice>>,
) -> impl IntoView {
    let timer = StoredValue::new_local(DismissSlot::<Timeout>::default());

    Effect::new(move |_| {
        if notice.with(Option::is_some) {
            let handle = Timeout::new(DISMISS_AFTER_MS, move || set_notice.set(None));
            timer.update_value(|slot| slot.arm(handle));
        } else {
            timer.update_value(DismissSlot::disarm);
        }
    });

    let class = move || {
        if notice.with(|n| n.as_ref().is_some_and(|n| n.is_error)) {
            "alert alert-error shadow-lg"
        } else {
            "alert alert-success shadow-lg"
        }
    };

    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=class>
                    <span>{move || notice.with(|n| n.as_ref().map(|n| n.text.clone()))}</span>
                </div>
            </div>
        </Show>
    }
}
