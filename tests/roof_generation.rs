#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use roofcraft::geometry::PathCommand;
use roofcraft::{Grouping, Piece, PieceRole, RoofMaker, RoofOptions, ScoreStyle, Unit};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn run(options: &RoofOptions) -> Vec<Piece> {
    init_tracing();
    RoofMaker::new(options).unwrap().generate().unwrap()
}

fn find<'a>(pieces: &'a [Piece], name: &str) -> &'a Piece {
    pieces
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("missing piece {name}"))
}

fn outline_len(pieces: &[Piece], name: &str) -> usize {
    find(pieces, name).boundary.points().len()
}

fn assert_well_formed(pieces: &[Piece]) {
    for piece in pieces {
        let commands = &piece.boundary.commands;
        assert!(
            matches!(commands.first(), Some(PathCommand::MoveTo(_))),
            "{} does not start with a move",
            piece.name
        );
        assert_eq!(commands.last(), Some(&PathCommand::Close), "{}", piece.name);
        for p in piece.boundary.points().iter().chain(&piece.scores.points()) {
            assert!(p.x.is_finite() && p.y.is_finite(), "{} has {p}", piece.name);
        }
    }
}

#[test]
fn default_model() {
    let pieces = run(&RoofOptions::default());
    assert_eq!(pieces.len(), 17);
    assert_well_formed(&pieces);

    let base = find(&pieces, "Roof_Base");
    let svg = base.boundary.to_string();
    assert!(svg.starts_with("M 0,0 L 672,0 L 672,288 L 0,288 Z M "));
    assert_eq!(base.boundary.subpath_count(), 2);

    // Front, window opening.
    let front = find(&pieces, "Front_Path");
    assert_eq!(front.boundary.subpath_count(), 2);
    assert!(!front.scores.is_empty());
}

#[test]
fn main_roof_outline_in_pixels() {
    let options = RoofOptions {
        unit: Unit::Pixel,
        ..RoofOptions::default()
    };
    let pieces = run(&options);
    let deco = find(&pieces, "Main_Roof_Deco");
    let points = deco.boundary.points();
    let want = [(1.0, 0.0), (6.0, 0.0), (7.0, 2.5), (0.0, 2.5)];
    assert_eq!(points.len(), want.len());
    for (p, (x, y)) in points.iter().zip(want) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-9);
    }
    assert_eq!(deco.grouping, Grouping::Separate);
}

#[test]
fn tabs_extend_the_structural_pieces() {
    let pieces = run(&RoofOptions::default());
    let side = find(&pieces, "Side_of_Roof");
    let deco = find(&pieces, "Side_of_RoofDeco");
    // Three edges, each with two tab points.
    let tabbed = side.boundary.points().len();
    assert_eq!(tabbed, deco.boundary.points().len() + 6);
    assert_eq!(side.role, PieceRole::Structural);
    assert_eq!(deco.role, PieceRole::Decorative);
    assert!(deco.scores.is_empty());
}

#[test]
fn barn_roof() {
    let options = RoofOptions {
        barn: true,
        ..RoofOptions::default()
    };
    let pieces = run(&options);
    assert_eq!(pieces.len(), 17);
    assert_well_formed(&pieces);
    assert!(!find(&pieces, "Main_Roof_Deco").scores.is_empty());
    assert_eq!(outline_len(&pieces, "Side_of_RoofDeco"), 5);
}

#[test]
fn flat_topped_dormer() {
    let options = RoofOptions {
        dormer_top_height: 0.0,
        ..RoofOptions::default()
    };
    let pieces = run(&options);
    assert_well_formed(&pieces);
    assert_eq!(outline_len(&pieces, "Front_Deco_Path"), 8);
    assert_eq!(outline_len(&pieces, "Dormer_Side_Deco"), 6);
}

#[test]
fn dormer_variants_stay_well_formed() {
    for (top, stickout, sides) in [
        (0.5, 0.25, 12),
        (1.5, 0.0, 7),
        (1.5, 0.25, 3),
        (0.25, 0.0, 2),
    ] {
        let options = RoofOptions {
            dormer_top_height: top,
            stickout,
            sides,
            ..RoofOptions::default()
        };
        let pieces = run(&options);
        assert_eq!(pieces.len(), 17);
        assert_well_formed(&pieces);
        let hole = find(&pieces, "Hole");
        assert_eq!(hole.boundary.subpath_count(), 1);
        assert_eq!(hole.role, PieceRole::Hole);
    }
}

#[test]
fn chimney_placement() {
    for off_center in [0.0, 0.3, 1.0] {
        let options = RoofOptions {
            off_center,
            ..RoofOptions::default()
        };
        let pieces = run(&options);
        assert_well_formed(&pieces);
        let hole = find(&pieces, "Chimneyhole");
        assert_eq!(hole.boundary.subpath_count(), 1);
        let straddles = off_center > 0.0 && off_center < 1.0;
        assert_eq!(hole.scores.is_empty(), !straddles, "{off_center}");
    }
}

#[test]
fn chimney_tabs_are_shrunk() {
    let pieces = run(&RoofOptions::default());
    let chimney = find(&pieces, "Chimney");
    let deco = find(&pieces, "Chimneydeco");
    let tab_height = 24.0 * 0.67;
    let outline_bottom = deco
        .boundary
        .points()
        .iter()
        .map(|p| p.y)
        .fold(f64::MIN, f64::max);
    let tab_bottom = chimney
        .boundary
        .points()
        .iter()
        .map(|p| p.y)
        .fold(f64::MIN, f64::max);
    assert!(tab_bottom > outline_bottom);
    assert!(tab_bottom - outline_bottom <= tab_height + 1e-9);
}

#[test]
fn solid_scores_are_grouped_separately() {
    let options = RoofOptions {
        score_style: ScoreStyle::Solid,
        barn: true,
        ..RoofOptions::default()
    };
    let pieces = run(&options);
    assert!(pieces.iter().all(|p| p.grouping == Grouping::Separate));
    let deco = find(&pieces, "Main_Roof_Deco");
    assert_eq!(deco.scores.subpath_count(), 1);
    assert_eq!(deco.scores.len(), 2);
}

#[test]
fn metric_units_scale_the_model() {
    let options = RoofOptions {
        unit: "mm".parse().unwrap(),
        roof_width: 254.0,
        ..RoofOptions::default()
    };
    let pieces = run(&options);
    let base = find(&pieces, "Roof_Base").boundary.points();
    assert_abs_diff_eq!(base[1].x, 960.0, epsilon = 1e-9);
}

#[test]
fn bad_options_fail_before_layout() {
    let options = RoofOptions {
        sides: 1,
        ..RoofOptions::default()
    };
    assert!(RoofMaker::new(&options).is_err());
    assert!("furlong".parse::<Unit>().is_err());
}
