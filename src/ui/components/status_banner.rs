use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    fn style(self) -> &'static str {
        match self {
            BannerKind::Success => "margin-top: 16px; padding: 16px; border-radius: 8px; background: #f0fdf4; color: #16a34a;",
            BannerKind::Error => "margin-top: 16px; padding: 16px; border-radius: 8px; background: #fef2f2; color: #dc2626;",
        }
    }
}

#[component]
pub fn StatusBanner(kind: BannerKind, message: String) -> Element {
    rsx! {
        div { style: kind.style(), "{message}" }
    }
}
