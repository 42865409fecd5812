//! content documents
use {
    serde::{Deserialize, Serialize},
    smart_default::SmartDefault,
};

/// a social platform a link can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// GitHub
    Github,
    /// LinkedIn
    Linkedin,
    /// Twitter
    Twitter,
    /// Email
    Email,
    /// anything the site doesn't have an icon for
    #[serde(other)]
    Other,
}

impl Platform {
    /// the display label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Twitter => "Twitter",
            Self::Email => "Email",
            Self::Other => "Link",
        }
    }
}

/// a link to a social profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// which platform, editors can leave it unset
    #[serde(default)]
    pub platform: Option<Platform>,
    /// where it points, editors can leave it unset
    #[serde(default)]
    pub url: Option<String>,
}

/// a reference to an uploaded asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// the asset document id, e.g. `image-<hash>-1200x630-jpg`
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// an image field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageField {
    /// the referenced asset
    pub asset: AssetRef,
}

impl ImageField {
    /// the cdn url of the image, `None` when the reference isn't an image id
    pub fn url(&self, project_id: &str, dataset: &str) -> Option<String> {
        let rest = self.asset.reference.strip_prefix("image-")?;
        let (stem, ext) = rest.rsplit_once('-')?;
        let (id, dimensions) = stem.rsplit_once('-')?;

        let (width, height) = dimensions.split_once('x')?;
        if id.is_empty()
            || ext.is_empty()
            || width.parse::<u32>().is_err()
            || height.parse::<u32>().is_err()
        {
            return None;
        }

        Some(format!(
            "https://cdn.sanity.io/images/{}/{}/{}-{}.{}",
            project_id, dataset, id, dimensions, ext
        ))
    }
}

/// the site-wide settings document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    /// the site title
    pub site_title: String,
    /// the site description
    pub description: String,
    /// where contact messages should go
    pub contact_email: String,
    /// where the owner is based
    #[default("Fayetteville, AR".to_string())]
    #[serde(default = "default_location")]
    pub location: String,
    /// social profile links
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    /// link to a downloadable résumé
    #[serde(default)]
    pub resume_url: Option<String>,
    /// the default open graph image
    #[serde(default)]
    pub seo_image: Option<ImageField>,
}

/// the default location
fn default_location() -> String {
    "Fayetteville, AR".to_string()
}

/// a run of text inside a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// the text
    #[serde(default)]
    pub text: String,
    /// decorators applied to the text (`strong`, `em`)
    #[serde(default)]
    pub marks: Vec<String>,
}

/// a paragraph of rich text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// the block style, only `normal` is used
    #[serde(default = "default_style")]
    pub style: String,
    /// the text runs
    #[serde(default)]
    pub children: Vec<Span>,
}

/// the default block style
fn default_style() -> String {
    "normal".to_string()
}

impl Block {
    /// the block's text without marks
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }

    /// the block as an html paragraph, with marks as `<strong>`/`<em>`
    pub fn to_html(&self) -> String {
        let mut html = String::from("<p>");

        for span in &self.children {
            let mut text = escape_html(&span.text);
            // the first mark ends up innermost
            for mark in &span.marks {
                text = match mark.as_str() {
                    "strong" => format!("<strong>{}</strong>", text),
                    "em" => format!("<em>{}</em>", text),
                    _ => text,
                };
            }
            html.push_str(&text);
        }

        html.push_str("</p>");
        html
    }
}

/// escape text for html
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }

    out
}

/// a job on the experience timeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// when
    #[serde(default)]
    pub year: String,
    /// the role
    #[serde(default)]
    pub title: String,
    /// the employer
    #[serde(default)]
    pub company: String,
    /// what the job was about
    #[serde(default)]
    pub description: String,
}

impl TimelineEntry {
    /// the `year - title` heading used in listings
    pub fn heading(&self) -> String {
        format!("{} - {}", self.year, self.title)
    }
}

/// a degree or course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    /// the degree
    #[serde(default)]
    pub degree: String,
    /// the school
    #[serde(default)]
    pub school: String,
    /// when
    #[serde(default)]
    pub year: String,
    /// details
    #[serde(default)]
    pub description: String,
}

/// the about page document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
pub struct AboutPage {
    /// the page title
    #[default("About".to_string())]
    #[serde(default = "default_about_title")]
    pub title: String,
    /// the biography
    #[serde(default)]
    pub bio: Vec<Block>,
    /// the experience timeline
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    /// skill tags
    #[serde(default)]
    pub skills: Vec<String>,
    /// education history
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// the default about page title
fn default_about_title() -> String {
    "About".to_string()
}

impl AboutPage {
    /// the biography as html paragraphs
    pub fn bio_html(&self) -> String {
        self.bio.iter().map(Block::to_html).collect()
    }

    /// the biography as plain text, one paragraph per line
    pub fn bio_text(&self) -> String {
        self.bio
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_decode_from_camel_case() {
        let json = r#"{
            "siteTitle": "Portfolio",
            "description": "Developer",
            "contactEmail": "me@example.com",
            "socialLinks": [{"platform": "github", "url": "https://github.com/me"}],
            "seoImage": {"asset": {"_ref": "image-abc123-1200x630-jpg"}}
        }"#;

        let settings: SiteSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.location, "Fayetteville, AR");
        assert_eq!(settings.social_links[0].platform, Some(Platform::Github));
        assert_eq!(settings.resume_url, None);
        assert_eq!(
            settings.seo_image.unwrap().url("proj", "production").as_deref(),
            Some("https://cdn.sanity.io/images/proj/production/abc123-1200x630.jpg")
        );
    }

    #[test]
    fn test_image_url_rejects_non_images() {
        let file = ImageField {
            asset: AssetRef {
                reference: "file-abc123-pdf".to_string(),
            },
        };
        let no_dims = ImageField {
            asset: AssetRef {
                reference: "image-abc123-bigxbig-png".to_string(),
            },
        };

        assert_eq!(file.url("p", "d"), None);
        assert_eq!(no_dims.url("p", "d"), None);
    }

    #[test]
    fn test_bio_renders_marks_and_escapes() {
        let about: AboutPage = serde_json::from_str(
            r#"{"bio": [{"_type": "block", "children": [
                {"text": "I build "},
                {"text": "fast", "marks": ["strong"]},
                {"text": " & <friendly>", "marks": ["em"]}
            ]}]}"#,
        )
        .unwrap();

        assert_eq!(about.title, "About");
        assert_eq!(
            about.bio_html(),
            "<p>I build <strong>fast</strong><em> &amp; &lt;friendly&gt;</em></p>"
        );
        assert_eq!(about.bio_text(), "I build fast & <friendly>");
    }

    #[test]
    fn test_timeline_heading() {
        let entry = TimelineEntry {
            year: "2024".to_string(),
            title: "Engineer".to_string(),
            ..Default::default()
        };

        assert_eq!(entry.heading(), "2024 - Engineer");
    }
}
