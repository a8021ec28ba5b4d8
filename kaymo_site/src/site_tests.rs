// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenarios that cross widgets.

use std::time::Duration;

use kaymo_core::{MarkId, MarkPayload, PickKey, Scene};

use crate::controller::PlayState;
use crate::frame_loop::LeafFallSnapshot;
use crate::player::TimelinePlayer;
use crate::site::Site;
use crate::{SiteConfig, SiteOptions};

fn opacity(scene: &Scene, id: u64) -> Option<f64> {
    scene.get(MarkId(id)).map(|m| m.payload.opacity())
}

fn font_weight(scene: &Scene, id: u64) -> Option<u16> {
    match scene.get(MarkId(id)).map(|m| &m.payload) {
        Some(MarkPayload::Text(t)) => Some(t.font_weight),
        _ => None,
    }
}

#[test]
fn hovering_plants_highlights_its_slice_and_legend_row() {
    let mut site = Site::new(SiteConfig::default()).unwrap();
    assert_eq!(
        site.biodiversity().chart().controller().totals(),
        (108, 7023)
    );

    let plants = site.biodiversity().chart().slice_centers()[3];
    assert_eq!(site.biodiversity().pointer_move(plants), Some(PickKey(3)));
    assert_eq!(site.sync(), 1, "only the legend still needs a redraw");
    assert_eq!(
        site.biodiversity().chart().controller().hovered_key(),
        Some("Plants")
    );

    for i in 0..5 {
        let expected = if i == 3 { 1.0 } else { 0.8 };
        assert_eq!(opacity(site.biodiversity().scene(), 0x100 + i), Some(expected));
        let expected = if i == 3 { 700 } else { 400 };
        assert_eq!(
            font_weight(site.legend().scene(), 0x1000 + 16 * i + 3),
            Some(expected)
        );
    }

    let page = site.snapshot(&LeafFallSnapshot::default());
    assert!(page.biodiversity_legend_svg.contains("Plants"));
    assert_eq!(page.biodiversity_hovered, Some("Plants"));
}

#[test]
fn leaving_the_legend_clears_the_donut_highlight() {
    let mut site = Site::new(SiteConfig::default()).unwrap();
    site.apply(&SiteOptions {
        hover: Some("Birds".into()),
        ..SiteOptions::default()
    });
    assert_eq!(opacity(site.biodiversity().scene(), 0x101), Some(1.0));

    site.legend().pointer_leave();
    site.sync();
    assert_eq!(opacity(site.biodiversity().scene(), 0x101), Some(0.8));
}

#[test]
fn out_of_range_years_clamp() {
    let mut site = Site::new(SiteConfig::default()).unwrap();
    let controller = site.timeline().chart().controller().clone();
    assert_eq!(controller.select_year(1999), 2000);
    assert_eq!(controller.select_year(2030), 2025);
}

#[tokio::test(start_paused = true)]
async fn the_player_advances_the_chart_until_toggled_off() {
    let mut site = Site::new(SiteConfig::default()).unwrap();
    site.apply(&SiteOptions {
        year: Some(2000),
        ..SiteOptions::default()
    });
    let redraws = site.timeline().redraw_count();

    assert_eq!(site.player().toggle_play().unwrap(), PlayState::Playing);
    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(site.player().toggle_play().unwrap(), PlayState::Paused);
    site.sync();
    assert_eq!(site.timeline().chart().controller().selected_year(), 2008);
    assert!(site.timeline().redraw_count() > redraws);

    // Nothing moves once paused.
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(site.sync(), 0);
    assert_eq!(site.timeline().chart().controller().selected_year(), 2008);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_player_cancels_its_timer() {
    let mut site = Site::new(SiteConfig::default()).unwrap();
    let controller = site.timeline().chart().controller().clone();
    let mut player = TimelinePlayer::new(controller.clone(), Duration::from_millis(1000));
    player.play().unwrap();
    drop(player);

    let before = controller.selected_year();
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(controller.selected_year(), before);
    assert_eq!(controller.play_state(), PlayState::Paused);
}
