//! Content profiles and the field records each one carries.
//!
//! Every profile owns an independent record, so switching between profiles
//! never loses what was typed into another one.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// The URL-only media kinds. They share one field shape.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum MediaKind {
    Video,
    Audio,
    Document,
    ImageGallery,
    Menu,
    App,
}

impl MediaKind {
    pub const ALL: [MediaKind; 6] = [
        MediaKind::Video,
        MediaKind::Audio,
        MediaKind::Document,
        MediaKind::ImageGallery,
        MediaKind::Menu,
        MediaKind::App,
    ];

    fn index(self) -> usize {
        use MediaKind::*;
        match self {
            Video => 0,
            Audio => 1,
            Document => 2,
            ImageGallery => 3,
            Menu => 4,
            App => 5,
        }
    }
}

/// One of the fixed content categories a user can encode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ProfileKind {
    #[default]
    Link,
    Text,
    Email,
    Wifi,
    Sms,
    Phone,
    ContactCard,
    Location,
    Calendar,
    Social,
    Media(MediaKind),
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 16] = [
        ProfileKind::Link,
        ProfileKind::Text,
        ProfileKind::Email,
        ProfileKind::Wifi,
        ProfileKind::Sms,
        ProfileKind::Phone,
        ProfileKind::ContactCard,
        ProfileKind::Location,
        ProfileKind::Calendar,
        ProfileKind::Social,
        ProfileKind::Media(MediaKind::Video),
        ProfileKind::Media(MediaKind::Audio),
        ProfileKind::Media(MediaKind::Document),
        ProfileKind::Media(MediaKind::ImageGallery),
        ProfileKind::Media(MediaKind::Menu),
        ProfileKind::Media(MediaKind::App),
    ];

    /// Stable short identifier, e.g. `wifi` or `vcard`.
    pub fn id(self) -> &'static str {
        use ProfileKind::*;
        match self {
            Link => "link",
            Text => "text",
            Email => "email",
            Wifi => "wifi",
            Sms => "sms",
            Phone => "tel",
            ContactCard => "vcard",
            Location => "location",
            Calendar => "calendar",
            Social => "social",
            Media(MediaKind::Video) => "video",
            Media(MediaKind::Audio) => "mp3",
            Media(MediaKind::Document) => "pdf",
            Media(MediaKind::ImageGallery) => "images",
            Media(MediaKind::Menu) => "menu",
            Media(MediaKind::App) => "app",
        }
    }

    /// Canonical field names accepted by [`ProfileFields::set`].
    pub fn field_names(self) -> &'static [&'static str] {
        use ProfileKind::*;
        match self {
            Link | Media(_) => &["url"],
            Text => &["body"],
            Email => &["to", "subject", "body"],
            Wifi => &["ssid", "password", "encryption"],
            Sms => &["number", "message"],
            Phone => &["number"],
            ContactCard => &["name", "company", "title", "phone", "email", "url"],
            Location => &["latitude", "longitude"],
            Calendar => &["title", "start", "end", "location", "description"],
            Social => &["platform", "username"],
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProfileKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ProfileKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| StoreError::UnknownProfile(s.to_string()))
    }
}

/// Wi-Fi authentication mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Encryption {
    None,
    #[default]
    Wpa,
    Wep,
}

impl Encryption {
    /// Token written after `T:` in a `WIFI:` payload. Open networks use
    /// `nopass`, the only "no password" token scanners accept.
    pub fn as_str(self) -> &'static str {
        match self {
            Encryption::None => "nopass",
            Encryption::Wpa => "WPA",
            Encryption::Wep => "WEP",
        }
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encryption {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wpa" | "wpa2" | "wpa/wpa2" => Ok(Encryption::Wpa),
            "wep" => Ok(Encryption::Wep),
            "none" | "nopass" => Ok(Encryption::None),
            _ => Err(StoreError::InvalidEncryption(s.to_string())),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct EmailFields {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct WifiFields {
    pub ssid: String,
    pub password: String,
    pub encryption: Encryption,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SmsFields {
    pub number: String,
    pub message: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ContactFields {
    pub name: String,
    pub company: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub url: String,
}

/// Coordinates are kept as typed text and emitted verbatim.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LocationFields {
    pub latitude: String,
    pub longitude: String,
}

/// `start` and `end` hold local date-times such as `2025-03-14T09:30`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CalendarFields {
    pub title: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub description: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SocialFields {
    pub platform: String,
    pub username: String,
}

/// The field records of every profile, side by side.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ProfileFields {
    pub link: String,
    pub text: String,
    pub email: EmailFields,
    pub wifi: WifiFields,
    pub sms: SmsFields,
    pub phone: String,
    pub contact: ContactFields,
    pub location: LocationFields,
    pub calendar: CalendarFields,
    pub social: SocialFields,
    media: [String; 6],
}

impl ProfileFields {
    pub fn media(&self, kind: MediaKind) -> &str {
        &self.media[kind.index()]
    }

    pub fn media_mut(&mut self, kind: MediaKind) -> &mut String {
        &mut self.media[kind.index()]
    }

    /// Writes a raw value into the named field of `profile`.
    ///
    /// Content is never validated here; only the field name, and for
    /// `encryption` the mode, must make sense.
    pub fn set(&mut self, profile: ProfileKind, field: &str, value: &str) -> Result<(), StoreError> {
        if profile == ProfileKind::Wifi && field.eq_ignore_ascii_case("encryption") {
            self.wifi.encryption = value.parse()?;
            return Ok(());
        }
        let slot = self.text_field_mut(profile, field).ok_or_else(|| StoreError::UnknownField {
            profile: profile.id(),
            field: field.to_string(),
        })?;
        *slot = value.to_string();
        Ok(())
    }

    /// Reads back the named field of `profile`.
    pub fn get(&self, profile: ProfileKind, field: &str) -> Option<&str> {
        use ProfileKind::*;
        let name = field.to_ascii_lowercase();
        let value = match (profile, name.as_str()) {
            (Link, "url") => &self.link,
            (Text, "body") => &self.text,
            (Email, "to") => &self.email.to,
            (Email, "subject") => &self.email.subject,
            (Email, "body") => &self.email.body,
            (Wifi, "ssid") => &self.wifi.ssid,
            (Wifi, "password") => &self.wifi.password,
            (Wifi, "encryption") => return Some(self.wifi.encryption.as_str()),
            (Sms, "number") => &self.sms.number,
            (Sms, "message") => &self.sms.message,
            (Phone, "number") => &self.phone,
            (ContactCard, "name") => &self.contact.name,
            (ContactCard, "company") => &self.contact.company,
            (ContactCard, "title") => &self.contact.title,
            (ContactCard, "phone") => &self.contact.phone,
            (ContactCard, "email") => &self.contact.email,
            (ContactCard, "url") => &self.contact.url,
            (Location, "latitude" | "lat") => &self.location.latitude,
            (Location, "longitude" | "lng") => &self.location.longitude,
            (Calendar, "title") => &self.calendar.title,
            (Calendar, "start") => &self.calendar.start,
            (Calendar, "end") => &self.calendar.end,
            (Calendar, "location") => &self.calendar.location,
            (Calendar, "description") => &self.calendar.description,
            (Social, "platform") => &self.social.platform,
            (Social, "username") => &self.social.username,
            (Media(kind), "url") => return Some(self.media(kind)),
            _ => return None,
        };
        Some(value.as_str())
    }

    fn text_field_mut(&mut self, profile: ProfileKind, field: &str) -> Option<&mut String> {
        use ProfileKind::*;
        let name = field.to_ascii_lowercase();
        let slot = match (profile, name.as_str()) {
            (Link, "url") => &mut self.link,
            (Text, "body") => &mut self.text,
            (Email, "to") => &mut self.email.to,
            (Email, "subject") => &mut self.email.subject,
            (Email, "body") => &mut self.email.body,
            (Wifi, "ssid") => &mut self.wifi.ssid,
            (Wifi, "password") => &mut self.wifi.password,
            (Sms, "number") => &mut self.sms.number,
            (Sms, "message") => &mut self.sms.message,
            (Phone, "number") => &mut self.phone,
            (ContactCard, "name") => &mut self.contact.name,
            (ContactCard, "company") => &mut self.contact.company,
            (ContactCard, "title") => &mut self.contact.title,
            (ContactCard, "phone") => &mut self.contact.phone,
            (ContactCard, "email") => &mut self.contact.email,
            (ContactCard, "url") => &mut self.contact.url,
            (Location, "latitude" | "lat") => &mut self.location.latitude,
            (Location, "longitude" | "lng") => &mut self.location.longitude,
            (Calendar, "title") => &mut self.calendar.title,
            (Calendar, "start") => &mut self.calendar.start,
            (Calendar, "end") => &mut self.calendar.end,
            (Calendar, "location") => &mut self.calendar.location,
            (Calendar, "description") => &mut self.calendar.description,
            (Social, "platform") => &mut self.social.platform,
            (Social, "username") => &mut self.social.username,
            (Media(kind), "url") => self.media_mut(kind),
            _ => return None,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_ids_round_trip() {
        for kind in ProfileKind::ALL {
            assert_eq!(kind.id().parse::<ProfileKind>().unwrap(), kind);
        }
        assert_eq!("WiFi".parse::<ProfileKind>().unwrap(), ProfileKind::Wifi);
        assert!(matches!("fax".parse::<ProfileKind>(), Err(StoreError::UnknownProfile(_))));
    }

    #[test]
    fn test_defaults() {
        let fields = ProfileFields::default();
        assert_eq!(fields.wifi.encryption, Encryption::Wpa);
        assert_eq!(fields.link, "");
        assert_eq!(ProfileKind::default(), ProfileKind::Link);
    }

    #[test]
    fn test_every_listed_field_is_writable() {
        let mut fields = ProfileFields::default();
        for kind in ProfileKind::ALL {
            for name in kind.field_names() {
                let value = if *name == "encryption" { "WEP" } else { "x" };
                fields.set(kind, name, value).unwrap();
                assert_eq!(fields.get(kind, name), Some(value));
            }
        }
    }

    #[test]
    fn test_unknown_field_leaves_record_untouched() {
        let mut fields = ProfileFields::default();
        let err = fields.set(ProfileKind::Sms, "ssid", "Home").unwrap_err();
        assert_eq!(
            err,
            StoreError::UnknownField { profile: "sms", field: "ssid".to_string() }
        );
        assert_eq!(fields, ProfileFields::default());
    }

    #[test]
    fn test_encryption_parsing() {
        let mut fields = ProfileFields::default();
        fields.set(ProfileKind::Wifi, "encryption", "none").unwrap();
        assert_eq!(fields.wifi.encryption, Encryption::None);
        assert!(fields.set(ProfileKind::Wifi, "encryption", "WPA3-SAE").is_err());
        assert_eq!(fields.wifi.encryption, Encryption::None);
    }

    #[test]
    fn test_empty_encryption_is_rejected() {
        let mut fields = ProfileFields::default();
        assert_eq!(
            fields.set(ProfileKind::Wifi, "encryption", "  "),
            Err(StoreError::InvalidEncryption("  ".to_string()))
        );
        assert_eq!(fields.wifi.encryption, Encryption::Wpa);
    }

    #[test]
    fn test_location_aliases() {
        let mut fields = ProfileFields::default();
        fields.set(ProfileKind::Location, "lat", "-23.5").unwrap();
        fields.set(ProfileKind::Location, "lng", "-46.6").unwrap();
        assert_eq!(fields.location.latitude, "-23.5");
        assert_eq!(fields.get(ProfileKind::Location, "longitude"), Some("-46.6"));
    }

    #[test]
    fn test_media_kinds_are_separate() {
        let mut fields = ProfileFields::default();
        fields.set(ProfileKind::Media(MediaKind::Video), "url", "https://v.example").unwrap();
        assert_eq!(fields.media(MediaKind::Video), "https://v.example");
        for kind in MediaKind::ALL.into_iter().filter(|k| *k != MediaKind::Video) {
            assert_eq!(fields.media(kind), "");
        }
    }
}
