use maud::{Markup, html};

use crate::styles::Breadcrumbs as CrumbClass;

pub struct Breadcrumb<'a> {
    pub label: &'a str,
    pub href: Option<&'a str>,
}

pub fn breadcrumbs(items: &[Breadcrumb]) -> Markup {
    html! {
        nav.(CrumbClass::BREADCRUMBS) {
            @for (i, item) in items.iter().enumerate() {
                @if i > 0 { " / " }
                @if let Some(href) = item.href {
                    a.(CrumbClass::CRUMB) href=(href) { (item.label) }
                } @else {
                    span.(CrumbClass::CRUMB_CURRENT) { (item.label) }
                }
            }
        }
    }
}
