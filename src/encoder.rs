//! Payload encoding: turns a profile's fields into the exact string a
//! scanning app expects (`mailto:`, `WIFI:`, `SMSTO:`, vCard, iCalendar...).
//!
//! Encoding is pure and deterministic. The only input that is not a field
//! value is the time zone used to convert calendar times to UTC, which
//! [`encode_in`] takes explicitly.

use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::ValidationError;
use crate::profile::{
    CalendarFields, ContactFields, EmailFields, ProfileFields, ProfileKind, SmsFields, SocialFields,
    WifiFields,
};

/// Characters left untouched in a URI component: alphanumerics and
/// `- _ . ! ~ * ' ( )`. Everything else, space included, becomes `%XX`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Accepted shapes of a local date-time field.
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Profile URL templates; `{}` is replaced by the username.
const SOCIAL_PLATFORMS: [(&str, &str); 6] = [
    ("instagram", "https://instagram.com/{}"),
    ("twitter", "https://twitter.com/{}"),
    ("linkedin", "https://linkedin.com/in/{}"),
    ("facebook", "https://facebook.com/{}"),
    ("youtube", "https://youtube.com/user/{}"),
    ("tiktok", "https://tiktok.com/@{}"),
];

/// Encodes the fields of `profile`, converting calendar times from the
/// system's local time zone.
///
/// An empty string is a valid result for the single-field profiles (link,
/// text, phone, media): it means there is nothing to encode, and it is up to
/// the caller to decide what to do with it.
///
/// # Example
///
/// ```rust
/// use qrcraft::encoder::encode;
/// use qrcraft::profile::{ProfileFields, ProfileKind};
///
/// let mut fields = ProfileFields::default();
/// fields.set(ProfileKind::Wifi, "ssid", "Home").unwrap();
/// fields.set(ProfileKind::Wifi, "password", "secret").unwrap();
///
/// assert_eq!(encode(ProfileKind::Wifi, &fields).unwrap(), "WIFI:S:Home;T:WPA;P:secret;;");
/// ```
pub fn encode(profile: ProfileKind, fields: &ProfileFields) -> Result<String, ValidationError> {
    encode_in(profile, fields, &Local)
}

/// Same as [`encode`], with calendar times interpreted in `tz`.
pub fn encode_in<Tz: TimeZone>(
    profile: ProfileKind,
    fields: &ProfileFields,
    tz: &Tz,
) -> Result<String, ValidationError> {
    use ProfileKind::*;
    match profile {
        Link => Ok(fields.link.trim().to_string()),
        Text => Ok(fields.text.trim().to_string()),
        Media(kind) => Ok(fields.media(kind).trim().to_string()),
        Phone => Ok(encode_phone(&fields.phone)),
        Email => Ok(encode_email(&fields.email)),
        Wifi => encode_wifi(&fields.wifi),
        Sms => encode_sms(&fields.sms),
        ContactCard => Ok(encode_contact(&fields.contact)),
        Location => encode_location(&fields.location.latitude, &fields.location.longitude),
        Calendar => encode_calendar(&fields.calendar, tz),
        Social => encode_social(&fields.social),
    }
}

/// Percent-encodes a URI component.
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

fn encode_phone(number: &str) -> String {
    let number = number.trim();
    if number.is_empty() {
        String::new()
    } else {
        format!("tel:{number}")
    }
}

fn encode_email(email: &EmailFields) -> String {
    let to = email.to.trim();
    let subject = email.subject.trim();
    let body = email.body.trim();

    let mut uri = format!("mailto:{to}");
    if subject.is_empty() && body.is_empty() {
        return uri;
    }
    uri.push('?');
    if !subject.is_empty() {
        uri.push_str("subject=");
        uri.push_str(&percent_encode(subject));
    }
    if !body.is_empty() {
        if !subject.is_empty() {
            uri.push('&');
        }
        uri.push_str("body=");
        uri.push_str(&percent_encode(body));
    }
    uri
}

// SSID and password are not escaped; `;`, `,` and `:` inside them will
// confuse most scanners.
fn encode_wifi(wifi: &WifiFields) -> Result<String, ValidationError> {
    let ssid = wifi.ssid.trim();
    if ssid.is_empty() {
        return Err(ValidationError::SsidRequired);
    }
    Ok(format!(
        "WIFI:S:{ssid};T:{};P:{};;",
        wifi.encryption.as_str(),
        wifi.password.trim()
    ))
}

fn encode_sms(sms: &SmsFields) -> Result<String, ValidationError> {
    let number = sms.number.trim();
    if number.is_empty() {
        return Err(ValidationError::PhoneNumberRequired);
    }
    Ok(format!("SMSTO:{number}:{}", percent_encode(sms.message.trim())))
}

fn encode_contact(contact: &ContactFields) -> String {
    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];

    let name = contact.name.trim();
    if !name.is_empty() {
        lines.push(format!("FN:{name}"));
        lines.push(format!("N:{name};;;"));
    }
    let properties = [
        ("ORG", &contact.company),
        ("TITLE", &contact.title),
        ("TEL", &contact.phone),
        ("EMAIL", &contact.email),
        ("URL", &contact.url),
    ];
    for (key, value) in properties {
        let value = value.trim();
        if !value.is_empty() {
            lines.push(format!("{key}:{value}"));
        }
    }

    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

fn encode_location(latitude: &str, longitude: &str) -> Result<String, ValidationError> {
    let (lat, lng) = (latitude.trim(), longitude.trim());
    if lat.is_empty() || lng.is_empty() {
        return Err(ValidationError::CoordinatesRequired);
    }
    Ok(format!("geo:{lat},{lng}"))
}

fn encode_calendar<Tz: TimeZone>(event: &CalendarFields, tz: &Tz) -> Result<String, ValidationError> {
    let title = event.title.trim();
    let start = event.start.trim();
    if title.is_empty() || start.is_empty() {
        return Err(ValidationError::TitleAndStartRequired);
    }

    let dtstart = utc_stamp(start, "start", tz)?;
    let end = event.end.trim();
    let dtend = if end.is_empty() {
        dtstart.clone()
    } else {
        utc_stamp(end, "end", tz)?
    };

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("SUMMARY:{title}"),
        format!("DTSTART:{dtstart}"),
        format!("DTEND:{dtend}"),
    ];
    let location = event.location.trim();
    if !location.is_empty() {
        lines.push(format!("LOCATION:{location}"));
    }
    let description = event.description.trim();
    if !description.is_empty() {
        lines.push(format!("DESCRIPTION:{description}"));
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());
    Ok(lines.join("\n"))
}

/// Converts a local date-time to UTC basic format, `YYYYMMDDTHHMMSSZ`.
///
/// Times skipped by a DST jump are rejected; repeated times resolve to the
/// earlier instant.
fn utc_stamp<Tz: TimeZone>(raw: &str, field: &'static str, tz: &Tz) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidDateTime {
        field,
        value: raw.to_string(),
    };
    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(invalid)?;
    let local = tz.from_local_datetime(&naive).earliest().ok_or_else(invalid)?;
    Ok(local.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string())
}

fn encode_social(social: &SocialFields) -> Result<String, ValidationError> {
    let platform = social.platform.trim().to_lowercase();
    let username = social.username.trim();
    if platform.is_empty() || username.is_empty() {
        return Err(ValidationError::PlatformAndUsernameRequired);
    }

    let known = SOCIAL_PLATFORMS
        .iter()
        .find(|(name, _)| *name == platform)
        .map(|(_, template)| template.replace("{}", username));
    // Unknown platforms get a best-effort web search instead of an error.
    Ok(known.unwrap_or_else(|| {
        format!(
            "https://www.google.com/search?q={}+{}",
            percent_encode(&platform),
            percent_encode(username)
        )
    }))
}
