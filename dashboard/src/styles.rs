mod global {
    turf::style_sheet!("assets/global.css");
}

mod breadcrumbs {
    turf::style_sheet!("assets/breadcrumbs.css");
}

mod cards {
    turf::style_sheet!("assets/cards.css");
}

mod news {
    turf::style_sheet!("assets/news.css");
}

mod charts {
    turf::style_sheet!("assets/charts.css");
}

mod panels {
    turf::style_sheet!("assets/panels.css");
}

pub use breadcrumbs::ClassName as Breadcrumbs;
pub use cards::ClassName as Cards;
pub use charts::ClassName as Charts;
pub use global::ClassName as Global;
pub use news::ClassName as News;
pub use panels::ClassName as Panels;

use std::sync::LazyLock;

pub static ALL: LazyLock<String> = LazyLock::new(|| {
    [
        global::STYLE_SHEET,
        breadcrumbs::STYLE_SHEET,
        cards::STYLE_SHEET,
        news::STYLE_SHEET,
        charts::STYLE_SHEET,
        panels::STYLE_SHEET,
    ]
    .join("\n")
});
