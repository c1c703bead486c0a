use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlImageElement;

use crate::diagnostics::js_value_to_string;

pub const ASSET_BASE_URL: &str = "assets/";

/// Every image the page ships. Only the title, username, main room and player sprite
/// are drawn today; the rest are placeholders for screens with no logic yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageId {
    Main,
    Atm,
    Slot,
    Pink1,
    Pink2,
    ShopIntro,
    ShopBuy,
    ExitBlocked,
    Title,
    Username,
    Win1,
    Win2,
    Time,
    Leaderboard,
    PlayerRight,
}

impl ImageId {
    pub const ALL: [ImageId; 15] = [
        ImageId::Main,
        ImageId::Atm,
        ImageId::Slot,
        ImageId::Pink1,
        ImageId::Pink2,
        ImageId::ShopIntro,
        ImageId::ShopBuy,
        ImageId::ExitBlocked,
        ImageId::Title,
        ImageId::Username,
        ImageId::Win1,
        ImageId::Win2,
        ImageId::Time,
        ImageId::Leaderboard,
        ImageId::PlayerRight,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ImageId::Main => "background4paradise.jpg",
            ImageId::Atm => "atm_background.png",
            ImageId::Slot => "slot_background.png",
            ImageId::Pink1 => "pink_eyes_1T.png",
            ImageId::Pink2 => "pink_eyes_2T.png",
            ImageId::ShopIntro => "shop_intro.png",
            ImageId::ShopBuy => "shop_buy.png",
            ImageId::ExitBlocked => "exit_blocked.png",
            ImageId::Title => "title_screen.png",
            ImageId::Username => "username_screen.png",
            ImageId::Win1 => "win_screen1.png",
            ImageId::Win2 => "win_screen2.png",
            ImageId::Time => "time_screen.png",
            ImageId::Leaderboard => "leaderboard_screen.png",
            ImageId::PlayerRight => "lumite.sprite.png",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ImageId::Main => "main",
            ImageId::Atm => "atm",
            ImageId::Slot => "slot",
            ImageId::Pink1 => "pink1",
            ImageId::Pink2 => "pink2",
            ImageId::ShopIntro => "shop_intro",
            ImageId::ShopBuy => "shop_buy",
            ImageId::ExitBlocked => "exit_blocked",
            ImageId::Title => "title",
            ImageId::Username => "username",
            ImageId::Win1 => "win1",
            ImageId::Win2 => "win2",
            ImageId::Time => "time",
            ImageId::Leaderboard => "leaderboard",
            ImageId::PlayerRight => "player_right",
        }
    }

    pub fn url(self, base: &str) -> String {
        if base.is_empty() || base.ends_with('/') {
            format!("{}{}", base, self.file_name())
        } else {
            format!("{}/{}", base, self.file_name())
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Ready,
    Failed,
}

struct Asset {
    id: ImageId,
    image: HtmlImageElement,
    status: Rc<Cell<AssetStatus>>,
}

pub struct Assets {
    entries: Vec<Asset>,
}

/// Called once per image after its decode settles. `Err` carries the reason.
pub type AssetCallback = Rc<dyn Fn(ImageId, Result<(), String>)>;

impl Assets {
    /// Creates every image element and starts decoding in the background.
    pub fn load(base: &str, on_settled: AssetCallback) -> Result<Self, JsValue> {
        let mut entries = Vec::with_capacity(ImageId::ALL.len());

        for id in ImageId::ALL {
            let image = HtmlImageElement::new()?;
            image.set_src(&id.url(base));
            let status = Rc::new(Cell::new(AssetStatus::Pending));

            let decode = image.decode();
            let status_cb = Rc::clone(&status);
            let on_settled = Rc::clone(&on_settled);
            spawn_local(async move {
                let result = JsFuture::from(decode)
                    .await
                    .map(|_| ())
                    .map_err(|err| js_value_to_string(&err));
                status_cb.set(if result.is_ok() {
                    AssetStatus::Ready
                } else {
                    AssetStatus::Failed
                });
                on_settled(id, result);
            });

            entries.push(Asset { id, image, status });
        }

        Ok(Self { entries })
    }

    pub fn status(&self, id: ImageId) -> Option<AssetStatus> {
        self.entries
            .iter()
            .find(|asset| asset.id == id)
            .map(|asset| asset.status.get())
    }

    /// Decoded image, or None while pending or after a failed load.
    pub fn drawable(&self, id: ImageId) -> Option<&HtmlImageElement> {
        let asset = self.entries.iter().find(|asset| asset.id == id)?;
        if asset.status.get() != AssetStatus::Ready {
            return None;
        }
        if !asset.image.complete() || asset.image.natural_width() == 0 {
            return None;
        }
        Some(&asset.image)
    }

    /// (ready, failed, total)
    pub fn summary(&self) -> (usize, usize, usize) {
        let ready = self
            .entries
            .iter()
            .filter(|asset| asset.status.get() == AssetStatus::Ready)
            .count();
        let failed = self
            .entries
            .iter()
            .filter(|asset| asset.status.get() == AssetStatus::Failed)
            .count();
        (ready, failed, self.entries.len())
    }
}
