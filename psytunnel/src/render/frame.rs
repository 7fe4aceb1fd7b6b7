use crate::assets::source::SourceImage;
use crate::config::params::ParameterSet;
use crate::effects::chain::PostFxChain;
use crate::foundation::core::{FrameIndex, Raster};
use crate::foundation::error::{TunnelError, TunnelResult};
use crate::render::context::FrameContext;
use crate::render::layers::{TunnelSpec, composite_tunnel};
use crate::render::starfield::{StarfieldSpec, render_starfield};
use crate::render::zoom::apply_zoom;

/// Builds any frame of the loop from the source image alone.
///
/// Frames never depend on each other, so they can be produced in any order or in parallel.
#[derive(Clone, Debug)]
pub struct FrameSynthesizer {
    params: ParameterSet,
    tunnel: TunnelSpec,
    stars: StarfieldSpec,
    post: PostFxChain,
}

impl FrameSynthesizer {
    /// Prepare the per-run stage specs from `params`.
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            tunnel: TunnelSpec {
                max_layers: params.max_layers,
                scale_decay: params.scale_decay,
                angle_per_frame: params.angle_per_frame(),
            },
            stars: StarfieldSpec {
                count: params.star_count,
                pattern: params.starfield_pattern,
                seed: params.star_seed,
            },
            post: PostFxChain::from_params(params),
            params: params.clone(),
        }
    }

    /// Parameters this synthesizer was built from.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Post effect chain applied after zoom.
    pub fn post_chain(&self) -> &PostFxChain {
        &self.post
    }

    /// Synthesize frame `index`.
    ///
    /// Order: transparent canvas at source size, starfield, tunnel layers, global zoom, post
    /// effects. Output dimensions always equal the source dimensions.
    #[tracing::instrument(level = "trace", skip_all, fields(frame = index.0))]
    pub fn synthesize(&self, source: &SourceImage, index: FrameIndex) -> TunnelResult<Raster> {
        if index.0 >= u64::from(self.params.frame_count) {
            return Err(TunnelError::render(format!(
                "frame {} out of range (frame_count={})",
                index.0, self.params.frame_count
            )));
        }
        let src = source.raster();
        if src.width == 0 || src.height == 0 {
            return Err(TunnelError::render("source image has zero area"));
        }

        let ctx = FrameContext::new(index, &self.params);
        let mut frame = Raster::transparent(src.width, src.height);

        render_starfield(&mut frame, self.stars, index);
        let layers = composite_tunnel(&mut frame, src, self.tunnel, index);
        let frame = apply_zoom(frame, ctx.zoom_scale);
        let frame = self.post.apply(frame, index, ctx.progress)?;

        tracing::trace!(
            layers,
            angle = ctx.angle_deg,
            zoom = ctx.zoom_scale,
            "frame synthesized"
        );
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
