use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::assets::{Assets, ImageId};
use crate::geometry::Rect;
use crate::screen::Screen;
use crate::session::Game;

pub const HUD_FONT: &str = "20px monospace";
pub const USERNAME_PROMPT: &str = "Click to start";
const USERNAME_TEXT_POS: (f64, f64) = (300.0, 200.0);
const WALLET_RIGHT_INSET: f64 = 160.0;
const WALLET_TEXT_Y: f64 = 40.0;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Image { id: ImageId, dest: Rect },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: &'static str,
        font: &'static str,
    },
}

pub fn format_wallet(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Draw list for the current screen. Pure so it can be checked without a canvas.
pub fn compose(game: &Game) -> Vec<DrawCommand> {
    let world = game.config.world;
    let full = world.bounds();
    let mut commands = vec![DrawCommand::Clear(full)];

    match game.screen {
        Screen::Title => {
            commands.push(DrawCommand::Image {
                id: ImageId::Title,
                dest: full,
            });
        }
        Screen::UsernameEntry => {
            commands.push(DrawCommand::Image {
                id: ImageId::Username,
                dest: full,
            });
            let text = if game.username.is_empty() {
                USERNAME_PROMPT.to_string()
            } else {
                game.username.clone()
            };
            commands.push(DrawCommand::Text {
                text,
                x: USERNAME_TEXT_POS.0,
                y: USERNAME_TEXT_POS.1,
                color: "black",
                font: HUD_FONT,
            });
        }
        Screen::Playing => {
            commands.push(DrawCommand::Image {
                id: ImageId::Main,
                dest: full,
            });
            commands.push(DrawCommand::Image {
                id: ImageId::PlayerRight,
                dest: game.player.bounds(),
            });
            commands.push(DrawCommand::Text {
                text: format_wallet(game.wallet),
                x: world.width - WALLET_RIGHT_INSET,
                y: WALLET_TEXT_Y,
                color: "green",
                font: HUD_FONT,
            });
        }
    }

    commands
}

/// Executes a draw list. Images that are not decoded yet are skipped.
pub fn paint(
    ctx: &CanvasRenderingContext2d,
    assets: &Assets,
    commands: &[DrawCommand],
) -> Result<(), JsValue> {
    for command in commands {
        match command {
            DrawCommand::Clear(rect) => ctx.clear_rect(rect.x, rect.y, rect.w, rect.h),
            DrawCommand::Image { id, dest } => {
                let Some(image) = assets.drawable(*id) else {
                    continue;
                };
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image, dest.x, dest.y, dest.w, dest.h,
                )?;
            }
            DrawCommand::Text {
                text,
                x,
                y,
                color,
                font,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_font(font);
                ctx.fill_text(text, *x, *y)?;
            }
        }
    }
    Ok(())
}
