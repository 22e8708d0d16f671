use std::fmt::{Display, Write};

use ::scraper::node::Text;
use ::scraper::{Html, Selector};
use chrono::{DateTime, Local, TimeZone};
use ego_tree::NodeMut;
use html5ever::{ns, Attribute, LocalName, QualName};
use tracing::{debug, instrument};

use crate::dom::{Element, Fragment, Node};
use crate::error::{LogError, Result};
use crate::model::{Log, LogEntry, Part};

/// Tag of the page element the log is appended to.
pub const CONTAINER_TAG: &str = "article";

pub const ROW_CLASS: &str = "privboard-row";
pub const STAR_BOTH_CLASS: &str = "privboard-star-both";
pub const STAR_FIRST_ONLY_CLASS: &str = "privboard-star-firstonly";

/// Somewhere a finished fragment can be attached.
pub trait DomSink {
    /// Append `fragment` to the page's content container in one operation.
    fn append_to_container(&mut self, fragment: Fragment) -> Result<()>;
}

/// How timestamps are turned into header dates and row times.
#[derive(Debug, Clone)]
pub struct RenderOptions<Tz: TimeZone> {
    pub timezone: Tz,
    pub date_format: String,
    pub time_format: String,
}

impl<Tz: TimeZone> RenderOptions<Tz> {
    /// Numeric `YYYY-MM-DD` dates and `HH:MM:SS` times in `timezone`.
    pub fn in_timezone(timezone: Tz) -> Self {
        Self {
            timezone,
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M:%S".to_string(),
        }
    }
}

impl Default for RenderOptions<Local> {
    fn default() -> Self {
        Self::in_timezone(Local)
    }
}

/// Build the fragment for `log` and hand it to `sink` as a single batch.
#[instrument(skip_all, fields(event = log.event, entries = log.entries.len()))]
pub fn add_log_to_page<Tz, D>(log: &Log, options: &RenderOptions<Tz>, sink: &mut D) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    D: DomSink + ?Sized,
{
    let fragment = build_fragment(log, options)?;
    debug!(nodes = fragment.nodes.len(), "appending log to page");
    sink.append_to_container(fragment)
}

/// Rows for every entry, with an `h2` date header wherever the date changes.
pub fn build_fragment<Tz>(log: &Log, options: &RenderOptions<Tz>) -> Result<Fragment>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut fragment = Fragment::new();
    let mut last_date: Option<String> = None;

    for entry in &log.entries {
        let local = entry.timestamp.with_timezone(&options.timezone);
        let date = format_timestamp(&local, &options.date_format)?;

        if last_date.as_deref() != Some(date.as_str()) {
            fragment.append(Element::new("h2").with_text(date.clone()));
            last_date = Some(date);
        }

        let time = format_timestamp(&local, &options.time_format)?;
        fragment.append(render_row(log.event, entry, &time));
    }

    Ok(fragment)
}

fn render_row(event: &str, entry: &LogEntry, time: &str) -> Element {
    let mut row = Element::new("div").with_class(ROW_CLASS);

    row.append(Node::text(format!("{time} ")));
    row.append(
        Element::new("a")
            .with_attribute("href", format!("/{event}/day/{}", entry.day))
            .with_text(format!("{:>2}", entry.day)),
    );
    row.append(Node::text(" "));
    row.append(
        Element::new("span")
            .with_class(star_class(entry.part))
            .with_text("*"),
    );
    row.append(Node::text(format!(" {}", entry.member.display_name())));

    row
}

/// Part two means both stars of the day are done.
fn star_class(part: Part) -> &'static str {
    match part {
        Part::One => STAR_FIRST_ONLY_CLASS,
        Part::Two => STAR_BOTH_CLASS,
    }
}

fn format_timestamp<Tz>(timestamp: &DateTime<Tz>, format: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", timestamp.format(format)).map_err(|_| LogError::InvalidFormat {
        format: format.to_owned(),
    })?;
    Ok(out)
}

/// An HTML page held as source text.
///
/// Appending parses the page, attaches the fragment as the last children of
/// the first container element and serializes the document again.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    source: String,
    container: String,
}

impl HtmlPage {
    /// A page whose log container is the first `<article>`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            container: CONTAINER_TAG.to_string(),
        }
    }

    /// The current page source, including anything appended so far.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }
}

impl DomSink for HtmlPage {
    fn append_to_container(&mut self, fragment: Fragment) -> Result<()> {
        let selector = Selector::parse(&self.container)?;
        let mut document = Html::parse_document(&self.source);

        let container_id = document.select(&selector).next().map(|element| element.id());
        let container = container_id.and_then(|id| document.tree.get_mut(id));
        let Some(mut container) = container else {
            return Err(LogError::ContainerNotFound {
                tag: self.container.clone(),
            });
        };

        for node in &fragment.nodes {
            attach(&mut container, node);
        }

        self.source = document.html();
        Ok(())
    }
}

/// Copy `node` and its descendants into the parsed document below `parent`.
fn attach(parent: &mut NodeMut<'_, ::scraper::Node>, node: &Node) {
    match node {
        Node::Text(text) => {
            parent.append(::scraper::Node::Text(Text {
                text: text.as_str().into(),
            }));
        }
        Node::Element(element) => {
            let mut child = parent.append(::scraper::Node::Element(html_element(element)));
            for grandchild in &element.children {
                attach(&mut child, grandchild);
            }
        }
    }
}

fn html_element(element: &Element) -> ::scraper::node::Element {
    let classes = (!element.classes.is_empty()).then(|| ("class", element.classes.join(" ")));
    let attributes = classes
        .into_iter()
        .chain(
            element
                .attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.clone())),
        )
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        })
        .collect();

    ::scraper::node::Element::new(
        QualName::new(None, ns!(html), LocalName::from(element.tag.as_str())),
        attributes,
    )
}
