use ember_curve::{CurveParams, CurveQuote};
use ember_types::creation::SocialLinks;
use ember_types::media::{MediaFile, MAX_IMAGE_BYTES};
use ember_types::stream::CreatorStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form mutations the aggregate rejects instead of silently ignoring.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("a stream is attached; detach it before attaching a video")]
    StreamAttached,

    #[error("a video is attached; detach it before attaching a stream")]
    VideoAttached,

    #[error("image must be less than 5MB")]
    ImageTooLarge,
}

/// Stream attachment fields. Title and link are user-entered; the rest is
/// filled by the external status lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamFields {
    pub title: String,
    pub link: String,
    pub preview_url: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// The mutable form aggregate, owned exclusively by one launch session.
/// Mutations go through the methods below so the stream/video mutual
/// exclusion and the clear-on-disable rules hold by construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: Option<MediaFile>,

    pub socials_enabled: bool,
    pub social_links: SocialLinks,

    pub stream_enabled: bool,
    pub stream: StreamFields,

    pub video_enabled: bool,
    /// Content address of the uploaded video, once its upload finished.
    pub video_address: Option<String>,

    pub first_buy_enabled: bool,
    /// User-entered spend amount in whole native units, kept as entered.
    pub buy_amount: String,
    /// Derived cost ceiling in whole native units, kept as displayed.
    pub max_base_cost: String,
}

impl TokenForm {
    /// Symbols are entered case-insensitively but stored uppercase.
    pub fn set_symbol(&mut self, symbol: &str) {
        self.symbol = symbol.to_uppercase();
    }

    /// Attach the token image, enforcing the size cap at selection time.
    pub fn attach_image(&mut self, file: MediaFile) -> Result<(), FormError> {
        if file.size() > MAX_IMAGE_BYTES {
            return Err(FormError::ImageTooLarge);
        }
        self.image = Some(file);
        Ok(())
    }

    pub fn set_socials_enabled(&mut self, enabled: bool) {
        self.socials_enabled = enabled;
        if !enabled {
            self.social_links = SocialLinks::default();
        }
    }

    /// Enable or disable the stream attachment. Enabling is rejected while
    /// a video is attached; disabling clears every stream-derived field.
    pub fn set_stream_enabled(&mut self, enabled: bool) -> Result<(), FormError> {
        if enabled && self.video_enabled {
            return Err(FormError::VideoAttached);
        }
        self.stream_enabled = enabled;
        if !enabled {
            self.stream = StreamFields::default();
        }
        Ok(())
    }

    /// Enable or disable the video attachment. Enabling is rejected while a
    /// stream is attached; disabling drops the stored content address. The
    /// upload session itself is owned by the media coordinator and cleared
    /// by the caller alongside this.
    pub fn set_video_enabled(&mut self, enabled: bool) -> Result<(), FormError> {
        if enabled && self.stream_enabled {
            return Err(FormError::StreamAttached);
        }
        self.video_enabled = enabled;
        if !enabled {
            self.video_address = None;
        }
        Ok(())
    }

    pub fn set_first_buy_enabled(&mut self, enabled: bool) {
        self.first_buy_enabled = enabled;
        if !enabled {
            self.buy_amount.clear();
            self.max_base_cost.clear();
        }
    }

    /// Record a spend amount and derive the displayed cost ceiling from a
    /// fresh quote.
    pub fn set_buy_amount(&mut self, amount: f64, params: &CurveParams) {
        self.buy_amount = amount.to_string();
        let quote = params.quote_spend(amount);
        self.max_base_cost =
            (quote.max_base_cost as f64 / params.unit_scale as f64).to_string();
    }

    /// The current first-buy quote. Zero while first buy is disabled or the
    /// entered amount does not parse to a positive number.
    pub fn first_buy_quote(&self, params: &CurveParams) -> CurveQuote {
        if !self.first_buy_enabled {
            return CurveQuote::ZERO;
        }
        match self.buy_amount.trim().parse::<f64>() {
            Ok(amount) => params.quote_spend(amount),
            Err(_) => CurveQuote::ZERO,
        }
    }

    /// Fold a stream lookup result into the form: a live stream fills the
    /// title, ids, profile image and the 1920x1080 preview; an offline one
    /// only drops the stale preview.
    pub fn apply_stream_lookup(&mut self, lookup: &CreatorStatus) {
        match lookup.status.live() {
            Some(stream) => {
                self.stream.title = stream.title.clone();
                self.stream.user_id = Some(stream.user_id.clone());
                self.stream.user_name = Some(stream.user_name.clone());
                if let Some(url) = &lookup.profile_image_url {
                    self.stream.profile_image_url = Some(url.clone());
                }
                if let Some(preview) = stream.thumbnail_at(1920, 1080) {
                    self.stream.preview_url = Some(preview);
                }
            }
            None => {
                self.stream.preview_url = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_types::stream::{LiveStream, StreamStatus};

    fn image(bytes: usize) -> MediaFile {
        MediaFile {
            name: "token.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0u8; bytes],
        }
    }

    #[test]
    fn symbol_is_stored_uppercase() {
        let mut form = TokenForm::default();
        form.set_symbol("ember1");
        assert_eq!(form.symbol, "EMBER1");
    }

    #[test]
    fn oversized_image_is_rejected() {
        let mut form = TokenForm::default();
        let err = form.attach_image(image(5 * 1024 * 1024 + 1)).unwrap_err();
        assert_eq!(err, FormError::ImageTooLarge);
        assert!(form.image.is_none());

        form.attach_image(image(1024)).unwrap();
        assert!(form.image.is_some());
    }

    #[test]
    fn stream_and_video_are_mutually_exclusive() {
        let mut form = TokenForm::default();

        form.set_stream_enabled(true).unwrap();
        assert_eq!(form.set_video_enabled(true), Err(FormError::StreamAttached));

        form.set_stream_enabled(false).unwrap();
        form.set_video_enabled(true).unwrap();
        assert_eq!(form.set_stream_enabled(true), Err(FormError::VideoAttached));
    }

    #[test]
    fn disabling_stream_clears_derived_fields() {
        let mut form = TokenForm::default();
        form.set_stream_enabled(true).unwrap();
        form.stream.title = "launch day".to_string();
        form.stream.link = "https://twitch.tv/streamer".to_string();
        form.stream.user_id = Some("1337".to_string());
        form.stream.user_name = Some("streamer".to_string());
        form.stream.profile_image_url = Some("https://cdn.example/p.png".to_string());
        form.stream.preview_url = Some("https://cdn.example/t.jpg".to_string());

        form.set_stream_enabled(false).unwrap();
        assert_eq!(form.stream, StreamFields::default());
    }

    #[test]
    fn disabling_first_buy_clears_amounts() {
        let mut form = TokenForm::default();
        form.set_first_buy_enabled(true);
        form.set_buy_amount(1.0, &CurveParams::default());
        assert!(!form.buy_amount.is_empty());
        assert!(!form.max_base_cost.is_empty());

        form.set_first_buy_enabled(false);
        assert!(form.buy_amount.is_empty());
        assert!(form.max_base_cost.is_empty());
    }

    #[test]
    fn set_buy_amount_derives_ceiling_text() {
        let mut form = TokenForm::default();
        form.set_first_buy_enabled(true);
        form.set_buy_amount(1.0, &CurveParams::default());

        assert_eq!(form.buy_amount, "1");
        // floor(1e9 * 1.10) lamports back in whole units.
        assert_eq!(form.max_base_cost, "1.1");
    }

    #[test]
    fn live_lookup_fills_stream_fields() {
        let mut form = TokenForm::default();
        form.set_stream_enabled(true).unwrap();

        let lookup = CreatorStatus {
            status: StreamStatus::Live(LiveStream {
                title: "launch day".to_string(),
                user_id: "1337".to_string(),
                user_name: "streamer".to_string(),
                thumbnail_url: Some("https://cdn.example/{width}x{height}.jpg".to_string()),
            }),
            profile_image_url: Some("https://cdn.example/p.png".to_string()),
        };
        form.apply_stream_lookup(&lookup);

        assert_eq!(form.stream.title, "launch day");
        assert_eq!(form.stream.user_id.as_deref(), Some("1337"));
        assert_eq!(form.stream.user_name.as_deref(), Some("streamer"));
        assert_eq!(
            form.stream.preview_url.as_deref(),
            Some("https://cdn.example/1920x1080.jpg")
        );
    }

    #[test]
    fn offline_lookup_drops_preview_only() {
        let mut form = TokenForm::default();
        form.set_stream_enabled(true).unwrap();
        form.stream.title = "kept".to_string();
        form.stream.preview_url = Some("https://cdn.example/stale.jpg".to_string());

        let lookup = CreatorStatus {
            status: StreamStatus::Offline,
            profile_image_url: None,
        };
        form.apply_stream_lookup(&lookup);

        assert_eq!(form.stream.title, "kept");
        assert!(form.stream.preview_url.is_none());
    }
}
