//! Canvas painting and sprite loading

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::sim::{Actor, Arena};

pub const PLAYER_SPRITE: &str = "p.png";
pub const ENEMY_SPRITE: &str = "m.png";

/// An image plus the color used when it failed to decode
pub struct Sprite {
    image: Option<HtmlImageElement>,
    fallback: &'static str,
}

impl Sprite {
    /// Load and decode `src`. The first frame is drawn only after this
    /// resolves; a broken image degrades to a solid square.
    pub async fn load(src: &str, fallback: &'static str) -> Self {
        match Self::decode(src).await {
            Ok(image) => Self {
                image: Some(image),
                fallback,
            },
            Err(e) => {
                log::warn!("Sprite {} unavailable, drawing squares: {:?}", src, e);
                Self {
                    image: None,
                    fallback,
                }
            }
        }
    }

    async fn decode(src: &str) -> Result<HtmlImageElement, JsValue> {
        let image = HtmlImageElement::new()?;
        image.set_src(src);
        JsFuture::from(image.decode()).await?;
        Ok(image)
    }

    fn draw(&self, ctx: &CanvasRenderingContext2d, actor: &Actor) {
        let (x, y, s) = (actor.pos.x as f64, actor.pos.y as f64, actor.size as f64);
        if let Some(image) = &self.image {
            if ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, s, s)
                .is_ok()
            {
                return;
            }
        }
        ctx.set_fill_style_str(self.fallback);
        ctx.fill_rect(x, y, s, s);
    }
}

pub struct Painter {
    ctx: CanvasRenderingContext2d,
    arena: Arena,
    player: Sprite,
    enemy: Sprite,
}

impl Painter {
    pub fn new(ctx: CanvasRenderingContext2d, arena: Arena, player: Sprite, enemy: Sprite) -> Self {
        Self {
            ctx,
            arena,
            player,
            enemy,
        }
    }

    /// Clear and draw both actors at their current positions
    pub fn draw(&self, player: &Actor, enemy: &Actor) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.arena.width as f64,
            self.arena.height as f64,
        );
        self.player.draw(&self.ctx, player);
        self.enemy.draw(&self.ctx, enemy);
    }
}
