//! Run driver: turns one set of options into the full list of pieces.

use tracing::{debug, info};

use crate::config::{LayoutConfig, RoofOptions};
use crate::error::Result;
use crate::layout::{ChimneyLayout, DormerLayout, Layout, RoofProfile};
use crate::math::Point2;
use crate::operations::{AssemblePiece, Cutout, Piece, PieceRole, TabSpec};

/// Builds every piece of one roof model.
///
/// ```
/// use roofcraft::config::RoofOptions;
/// use roofcraft::generate::RoofMaker;
///
/// let pieces = RoofMaker::new(&RoofOptions::default())?.generate()?;
/// assert_eq!(pieces[0].name, "Roof_Base");
/// # Ok::<(), roofcraft::RoofError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RoofMaker {
    config: LayoutConfig,
    profile: RoofProfile,
}

impl RoofMaker {
    /// Validates `options` and prepares the roof profile.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the options are invalid.
    pub fn new(options: &RoofOptions) -> Result<Self> {
        let config = options.layout_config()?;
        let profile = RoofProfile::new(&config);
        Ok(Self { config, profile })
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn profile(&self) -> &RoofProfile {
        &self.profile
    }

    /// Produces the pieces in sheet order: roof, then dormer, then chimney.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` if a piece collapses to fewer
    /// than three distinct points.
    pub fn generate(&self) -> Result<Vec<Piece>> {
        let mut pieces = Vec::new();
        self.roof_pieces(&mut pieces)?;
        if let Some(dormer) = &self.config.dormer {
            let layout = DormerLayout::new(dormer, self.profile.dormer_pitch());
            self.dormer_pieces(&layout, dormer.window_inset, &mut pieces)?;
        }
        if let Some(chimney) = &self.config.chimney {
            let layout = ChimneyLayout::new(chimney, self.profile.chimney_pitch());
            debug!(straddles_ridge = layout.straddles_ridge, "chimney layout");
            self.chimney_pieces(&layout, &mut pieces)?;
        }
        info!(pieces = pieces.len(), "roof generated");
        Ok(pieces)
    }

    fn piece(&self, name: &str, role: PieceRole, outline: Vec<Point2>) -> AssemblePiece {
        AssemblePiece::new(name, role, outline, self.config.tab, self.config.score)
    }

    fn roof_pieces(&self, pieces: &mut Vec<Piece>) -> Result<()> {
        let base = self.profile.base();
        let vent = Cutout::new(base.outline.clone(), -self.config.base_cutout);
        let base = self.piece("Roof_Base", PieceRole::Structural, base.outline);
        pieces.push(base.cutout(vent).execute()?);

        let side = self.profile.side();
        for name in ["Side_of_Roof", "Side_of_Roof2"] {
            let piece = self.tabbed(name, &side).wrap_tab(true);
            pieces.push(piece.execute()?);
        }
        for name in ["Side_of_RoofDeco", "Side_of_RoofDeco2"] {
            pieces.push(self.deco(name, &side).execute()?);
        }

        let main = self.profile.main();
        let first = self.tabbed("Main_Roof", &main).combine(false);
        pieces.push(first.execute()?);
        // The second slope leaves its ridge tab to the first.
        let second = Layout {
            tabs: main.tabs.iter().skip(1).copied().collect(),
            ..main.clone()
        };
        let second = self.tabbed("Main_Roof_2", &second).combine(false);
        pieces.push(second.execute()?);
        for name in ["Main_Roof_Deco", "Main_Roof_Deco2"] {
            let piece = self.deco(name, &main).combine(false);
            pieces.push(piece.execute()?);
        }
        Ok(())
    }

    fn dormer_pieces(
        &self,
        layout: &DormerLayout,
        window_inset: f64,
        pieces: &mut Vec<Piece>,
    ) -> Result<()> {
        let half_dash = self.config.score.scaled(0.5);
        let window = Cutout::new(layout.window.clone(), -window_inset);

        pieces.push(
            self.tabbed("Front_Path", &layout.front)
                .wrap_tab(true)
                .cutout(window.clone())
                .with_score(half_dash)
                .execute()?,
        );
        let opening = layout.window.clone();
        pieces.push(
            self.piece("Front_Deco_Path", PieceRole::Decorative, opening)
                .cutout(window)
                .execute()?,
        );
        let hole = Cutout::new(layout.hole.clone(), self.config.paper).only();
        pieces.push(
            self.piece("Hole", PieceRole::Hole, layout.hole.clone())
                .cutout(hole)
                .execute()?,
        );

        let tab = &self.config.tab;
        let side_tab = TabSpec::new(tab.height, tab.angle / 2.0);
        pieces.push(
            self.tabbed("Dormer_Side", &layout.side)
                .with_tab(side_tab)
                .with_score(half_dash)
                .execute()?,
        );
        let outline = layout.side.outline.clone();
        pieces.push(
            self.piece("Dormer_Side_Deco", PieceRole::Decorative, outline)
                .scores(layout.side.deco_scores.clone())
                .execute()?,
        );
        Ok(())
    }

    fn chimney_pieces(&self, layout: &ChimneyLayout, pieces: &mut Vec<Piece>) -> Result<()> {
        let shrink = self.config.shrink;
        pieces.push(
            self.tabbed("Chimney", &layout.body)
                .with_tab(self.config.tab.scaled(shrink))
                .with_score(self.config.score.scaled(shrink))
                .execute()?,
        );
        let deco = self.deco("Chimneydeco", &layout.body);
        pieces.push(deco.execute()?);

        let outline = &layout.hole.outline;
        let opening = Cutout::new(outline.clone(), -self.config.paper).only();
        pieces.push(
            self.piece("Chimneyhole", PieceRole::Hole, outline.clone())
                .scores(layout.hole.scores.clone())
                .cutout(opening)
                .execute()?,
        );
        Ok(())
    }

    fn tabbed(&self, name: &str, layout: &Layout) -> AssemblePiece {
        let outline = layout.outline.clone();
        self.piece(name, PieceRole::Structural, outline)
            .tabs(layout.tabs.clone())
            .scores(layout.scores.clone())
    }

    fn deco(&self, name: &str, layout: &Layout) -> AssemblePiece {
        let outline = layout.outline.clone();
        self.piece(name, PieceRole::Decorative, outline)
            .scores(layout.deco_scores.clone())
    }
}

/// Convenience wrapper around [`RoofMaker`].
///
/// # Errors
///
/// See [`RoofMaker::new`] and [`RoofMaker::generate`].
pub fn generate(options: &RoofOptions) -> Result<Vec<Piece>> {
    RoofMaker::new(options)?.generate()
}
