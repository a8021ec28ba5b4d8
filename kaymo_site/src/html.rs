// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the page as a single self-contained HTML document.
//!
//! Charts arrive as finished SVG strings; everything else is static copy from
//! [`content`](crate::content) plus the widget states the charts were drawn from, so the
//! controls around each chart (slider position, pressed tab, hovered legend row) agree with it.

use std::fmt::Write as _;

use kaymo_charts::{format_grouped, format_number};

use crate::content::{
    BIODIVERSITY_HEADING, CALL_TO_ACTION, CAUSES, CAUSES_HEADING, CLIMATE_HEADING,
    ECONOMIC_HEADING, ECONOMIC_IMPACTS, ECONOMIC_TOTAL, FOOTER, HERO_DESCRIPTION, HERO_HEADLINE,
    HERO_STATS, Heading, IMPACTS, IMPACTS_HEADING, KEY_METRICS, KEY_METRICS_HEADING,
    REGIONAL_HEADING, TAKEAWAYS, TIMELINE_HEADING,
};
use crate::controller::{
    ClimateMetric, ClimateState, PlayState, RegionalChart, RegionalState, TimelineState,
};
use crate::data::{CLIMATE, COUNTRIES, YearRecord};
use crate::svg::escape_xml;

/// Page title.
pub const TITLE: &str = "Somalia's Vanishing Forests";

const STYLE: &str = "body{margin:0;font-family:system-ui,sans-serif;color:#374151;background:#fff}\
section{padding:64px 24px;max-width:1200px;margin:0 auto}\
h1{font-size:48px;margin:0 0 16px}h2{font-size:36px;margin:0 0 12px}h3{font-size:24px}\
.lead{color:#6B7280;max-width:800px}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(260px,1fr));gap:24px}\
.card{border:1px solid #E5E7EB;border-radius:12px;padding:24px;background:#F9FAFB}\
.value{font-size:32px;font-weight:700;color:#DC2626}\
.bar{height:8px;border-radius:4px;background:#E5E7EB}.bar>div{height:8px;border-radius:4px}\
button[aria-pressed=true]{background:#DC2626;color:#fff}\
svg{max-width:100%;height:auto}\
.hero{background:#111827;color:#fff;max-width:none}\
footer{padding:32px;text-align:center;color:#6B7280}";

/// The state of every widget at the moment the page is rendered.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// Hero leaf-fall frame.
    pub leaf_fall_svg: String,
    /// Timeline chart.
    pub timeline_svg: String,
    /// State the timeline was drawn from.
    pub timeline: TimelineState,
    /// First and last dataset year (the slider range).
    pub timeline_range: (i32, i32),
    /// Record shown in the year card.
    pub timeline_record: Option<YearRecord>,
    /// Regional comparison chart.
    pub regional_svg: String,
    /// State the regional chart was drawn from.
    pub regional: RegionalState,
    /// Biodiversity donut.
    pub biodiversity_svg: String,
    /// Biodiversity legend rows.
    pub biodiversity_legend_svg: String,
    /// Hovered species category.
    pub biodiversity_hovered: Option<&'static str>,
    /// Threatened and assessed species over all categories.
    pub species_totals: (u32, u32),
    /// Climate chart.
    pub climate_svg: String,
    /// State the climate chart was drawn from.
    pub climate: ClimateState,
}

/// Renders the whole document.
pub fn render_page(page: &PageSnapshot) -> String {
    let mut out = String::with_capacity(64 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape_xml(TITLE)
    );
    hero(&mut out, page);
    key_metrics(&mut out);
    causes(&mut out, page);
    impacts(&mut out, page);
    let _ = write!(out, "<footer>{}</footer>\n</body>\n</html>\n", escape_xml(FOOTER));
    out
}

fn heading(out: &mut String, tag: &str, h: &Heading) {
    let _ = write!(
        out,
        "<{tag}>{}</{tag}>\n<p class=\"lead\">{}</p>\n",
        escape_xml(h.title),
        escape_xml(h.subtitle)
    );
}

fn open_section(out: &mut String, id: &str) {
    let _ = writeln!(out, "<section id=\"{id}\">");
}

fn hero(out: &mut String, page: &PageSnapshot) {
    out.push_str("<section id=\"hero\" class=\"hero\">\n");
    let _ = write!(
        out,
        "<h1>{}</h1>\n<div class=\"value\">{}</div>\n<p>{}</p>\n<p class=\"lead\">{}</p>\n",
        escape_xml(TITLE),
        escape_xml(&HERO_HEADLINE.counter.final_text()),
        escape_xml(HERO_HEADLINE.caption),
        escape_xml(HERO_DESCRIPTION)
    );
    out.push_str("<div class=\"grid\">\n");
    for stat in &HERO_STATS {
        let _ = writeln!(
            out,
            "<div class=\"card\"><div class=\"value\" data-target=\"{}\">{}</div><p>{}</p></div>",
            format_number(stat.counter.target),
            escape_xml(&stat.counter.final_text()),
            escape_xml(stat.caption)
        );
    }
    out.push_str("</div>\n<div class=\"leaf-fall\">\n");
    out.push_str(&page.leaf_fall_svg);
    let _ = write!(
        out,
        "</div>\n<a href=\"#{}\">Explore the Data</a>\n</section>\n",
        KEY_METRICS_HEADING.id
    );
}

fn key_metrics(out: &mut String) {
    open_section(out, KEY_METRICS_HEADING.id);
    heading(out, "h2", &KEY_METRICS_HEADING);
    out.push_str("<div class=\"grid\">\n");
    for card in KEY_METRICS {
        let kind = card.source_kind();
        let _ = writeln!(
            out,
            "<div class=\"card\"><h3>{}</h3><div class=\"value\">{}</div><p>{}</p>\
             <p><span class=\"badge\">{}</span> {} <small>trust {}%</small></p></div>",
            escape_xml(card.title),
            escape_xml(card.value),
            escape_xml(card.description),
            escape_xml(kind.label()),
            escape_xml(card.source),
            kind.trust()
        );
    }
    out.push_str("</div>\n</section>\n");
}

fn causes(out: &mut String, page: &PageSnapshot) {
    open_section(out, CAUSES_HEADING.id);
    heading(out, "h2", &CAUSES_HEADING);
    out.push_str("<div class=\"grid\">\n");
    for cause in CAUSES {
        let _ = writeln!(
            out,
            "<div class=\"card\"><h3>{} {}</h3><p>{}</p><p><strong>{}</strong></p>\
             <div class=\"bar\"><div style=\"width:{}%;background:#{:06X}\"></div></div>\
             <p>{}% of deforestation</p></div>",
            cause.icon,
            escape_xml(cause.title),
            escape_xml(cause.description),
            escape_xml(cause.impact),
            format_number(cause.percentage),
            cause.color,
            format_number(cause.percentage)
        );
    }
    out.push_str("</div>\n");
    timeline(out, page);
    regional(out, page);

    out.push_str("<h3>Key Takeaways</h3>\n<div class=\"grid\">\n");
    for t in TAKEAWAYS {
        let _ = writeln!(
            out,
            "<div class=\"card\"><div class=\"value\">{}</div><h4>{}</h4><p>{}</p></div>",
            escape_xml(t.value),
            escape_xml(t.label),
            escape_xml(t.note)
        );
    }
    out.push_str("</div>\n</section>\n");
}

fn timeline(out: &mut String, page: &PageSnapshot) {
    let _ = writeln!(out, "<div id=\"{}\">", TIMELINE_HEADING.id);
    heading(out, "h3", &TIMELINE_HEADING);
    let state = &page.timeline;
    if let Some(record) = &page.timeline_record {
        let _ = write!(
            out,
            "<div class=\"card\"><div class=\"value\">{}</div>\
             <p>Forest cover: {}K hectares</p><p>Deforestation rate: {}%</p><ul>",
            state.selected_year,
            format_grouped(record.forest_cover_kha),
            format_number(record.deforestation_rate_pct)
        );
        for event in record.events {
            let _ = write!(out, "<li>{}</li>", escape_xml(event));
        }
        out.push_str("</ul></div>\n");
    }
    let (lo, hi) = page.timeline_range;
    let play_label = match state.play {
        PlayState::Paused => "Play",
        PlayState::Playing => "Pause",
    };
    let _ = writeln!(
        out,
        "<input type=\"range\" min=\"{lo}\" max=\"{hi}\" step=\"1\" value=\"{}\" \
         aria-label=\"Year\">\n<button data-action=\"play\">{play_label}</button>\
         <button data-action=\"reset\">Reset</button>",
        state.selected_year
    );
    out.push_str(&page.timeline_svg);
    out.push_str("</div>\n");
}

fn regional(out: &mut String, page: &PageSnapshot) {
    let _ = writeln!(out, "<div id=\"{}\">", REGIONAL_HEADING.id);
    heading(out, "h3", &REGIONAL_HEADING);
    let active = page.regional.chart;
    out.push_str("<div role=\"tablist\">");
    for chart in RegionalChart::ALL {
        let _ = write!(
            out,
            "<button data-chart=\"{}\" aria-pressed=\"{}\">{}</button>",
            chart.key(),
            chart == active,
            escape_xml(chart.label())
        );
    }
    let _ = writeln!(out, "</div>\n<p>{}</p>", escape_xml(active.description()));
    out.push_str(&page.regional_svg);
    let _ = write!(
        out,
        "<div class=\"card\"><h4>Key Insights</h4><p>{}</p></div>\n</div>\n",
        escape_xml(&active.insight(COUNTRIES))
    );
}

fn impacts(out: &mut String, page: &PageSnapshot) {
    open_section(out, IMPACTS_HEADING.id);
    heading(out, "h2", &IMPACTS_HEADING);
    out.push_str("<div class=\"grid\">\n");
    for card in IMPACTS {
        let _ = write!(
            out,
            "<div class=\"card\"><h3>{} {}</h3><p>{}</p><dl>",
            card.icon,
            escape_xml(card.title),
            escape_xml(card.description)
        );
        for stat in &card.stats {
            let _ = write!(
                out,
                "<dt>{}</dt><dd>{}</dd>",
                escape_xml(stat.label),
                escape_xml(stat.value)
            );
        }
        out.push_str("</dl></div>\n");
    }
    out.push_str("</div>\n");
    biodiversity(out, page);
    climate(out, page);
    economic(out);

    let _ = writeln!(out, "<div id=\"{}\" class=\"card\">", CALL_TO_ACTION.id);
    heading(out, "h3", &CALL_TO_ACTION);
    out.push_str("</div>\n</section>\n");
}

fn biodiversity(out: &mut String, page: &PageSnapshot) {
    let _ = writeln!(out, "<div id=\"{}\">", BIODIVERSITY_HEADING.id);
    heading(out, "h3", &BIODIVERSITY_HEADING);
    out.push_str("<div class=\"grid\">\n");
    out.push_str(&page.biodiversity_svg);
    out.push_str(&page.biodiversity_legend_svg);
    let (threatened, total) = page.species_totals;
    let _ = write!(
        out,
        "</div>\n<p class=\"summary\">Total threatened: <strong>{}</strong> of {} assessed species</p>\n",
        format_grouped(f64::from(threatened)),
        format_grouped(f64::from(total))
    );
    if let Some(key) = page.biodiversity_hovered {
        let _ = writeln!(out, "<p data-hovered=\"{0}\">Showing {0}</p>", escape_xml(key));
    }
    out.push_str("</div>\n");
}

fn climate(out: &mut String, page: &PageSnapshot) {
    let _ = writeln!(out, "<div id=\"{}\">", CLIMATE_HEADING.id);
    heading(out, "h3", &CLIMATE_HEADING);
    let active = page.climate.metric;
    out.push_str("<div role=\"tablist\">");
    for metric in ClimateMetric::ALL {
        let _ = write!(
            out,
            "<button data-metric=\"{}\" aria-pressed=\"{}\">{} {}</button>",
            metric.key(),
            metric == active,
            metric.icon(),
            escape_xml(metric.label())
        );
    }
    out.push_str("</div>\n");
    out.push_str(&page.climate_svg);

    let current = CLIMATE
        .last()
        .map(|r| active.format(active.value(r)))
        .unwrap_or_default();
    let trend = active.trend(CLIMATE);
    let _ = write!(
        out,
        "<div class=\"grid\">\
         <div class=\"card\"><h4>{} {}</h4><p>{}</p></div>\
         <div class=\"card\"><h4>Current Value</h4><div class=\"value\">{}</div></div>\
         <div class=\"card\"><h4>Trend</h4><p>{} {}</p></div>\
         <div class=\"card\"><h4>Primary Impact</h4><p>{}</p></div>\
         </div>\n</div>\n",
        active.icon(),
        escape_xml(active.label()),
        escape_xml(active.description()),
        escape_xml(&current),
        trend.icon(),
        trend.headline(),
        escape_xml(active.primary_impact())
    );
}

fn economic(out: &mut String) {
    let _ = writeln!(out, "<div id=\"{}\">", ECONOMIC_HEADING.id);
    heading(out, "h3", &ECONOMIC_HEADING);
    let _ = write!(
        out,
        "<div class=\"value\">{}</div>\n<table>\n",
        escape_xml(ECONOMIC_TOTAL)
    );
    for row in ECONOMIC_IMPACTS {
        let _ = writeln!(
            out,
            "<tr><th>{}</th><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_xml(row.category),
            escape_xml(row.value),
            escape_xml(row.description),
            escape_xml(row.trend)
        );
    }
    out.push_str("</table>\n</div>\n");
}

/// Anchor ids of the top-level sections, in page order.
pub fn section_ids() -> [&'static str; 4] {
    [
        "hero",
        KEY_METRICS_HEADING.id,
        CAUSES_HEADING.id,
        IMPACTS_HEADING.id,
    ]
}
