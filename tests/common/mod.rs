//! Shared page fixture for the integration tests.

#![allow(dead_code)]

use directory_page::domain::{Document, ElementSpec, NodeId, Rect, Viewport};
use directory_page::{initialize, Config, Event, PageRuntime, RecordingBackend};

pub const VIEWPORT: Viewport = Viewport::new(0.0, 0.0, 800.0, 600.0);

/// A listing item: display name, `data-name`, `data-price`.
pub type Item<'a> = (&'a str, Option<&'a str>, Option<&'a str>);

pub struct Page {
    pub runtime: PageRuntime<RecordingBackend>,
    pub mobile_btn: NodeId,
    pub nav: NodeId,
    pub toggles: Vec<NodeId>,
    pub panels: Vec<NodeId>,
    pub panel_links: Vec<NodeId>,
    pub search_input: NodeId,
    pub name_btn: NodeId,
    pub price_btn: NodeId,
    pub filter: NodeId,
    pub grid: NodeId,
    pub items: Vec<NodeId>,
    pub hero_image: NodeId,
    pub footer_image: NodeId,
    pub banner: NodeId,
    pub contact: NodeId,
    pub email: NodeId,
    pub main: NodeId,
}

impl Page {
    pub fn doc(&self) -> &Document {
        &self.runtime.state().document
    }

    pub fn dispatch(&mut self, event: Event) -> bool {
        self.runtime.dispatch(&event)
    }

    pub fn click(&mut self, target: NodeId) -> bool {
        self.dispatch(Event::Click { target })
    }

    pub fn type_into(&mut self, target: NodeId, value: &str) -> bool {
        self.dispatch(Event::Input {
            target,
            value: value.to_string(),
        })
    }

    pub fn open_panels(&self) -> Vec<NodeId> {
        self.panels
            .iter()
            .copied()
            .filter(|&panel| self.doc().has_class(panel, "active"))
            .collect()
    }

    pub fn expanded(&self, trigger: NodeId) -> Option<&str> {
        self.doc().attr(trigger, "aria-expanded")
    }

    /// Item display names in current grid order.
    pub fn grid_order(&self) -> Vec<String> {
        self.doc()
            .children(self.grid)
            .iter()
            .map(|&item| self.doc().text(item).to_string())
            .collect()
    }

    pub fn visible_items(&self) -> Vec<NodeId> {
        self.items
            .iter()
            .copied()
            .filter(|&item| !self.doc().is_hidden(item))
            .collect()
    }
}

pub fn default_items() -> Vec<Item<'static>> {
    vec![
        ("Oak Desk", Some("Oak Desk"), Some("250")),
        ("birch shelf", Some("birch shelf"), Some("90")),
        ("Walnut Chair", Some("Walnut Chair"), Some("120")),
        ("Pine Stool", Some("Pine Stool"), Some("n/a")),
    ]
}

/// Builds the full directory page and dispatches `DocumentReady`.
pub fn page() -> Page {
    page_with_items(&default_items())
}

pub fn page_with_items(items: &[Item<'_>]) -> Page {
    let mut page = build(items);
    page.runtime.dispatch(&Event::DocumentReady);
    page
}

/// The same page before `DocumentReady` has been delivered.
pub fn unready_page() -> Page {
    build(&default_items())
}

fn build(items: &[Item<'_>]) -> Page {
    let mut doc = Document::new();
    let body = doc.body();

    let header = doc.append(body, ElementSpec::new("header")).unwrap();
    let mobile_btn = doc
        .append(header, ElementSpec::new("button").class("mobile-menu-btn").text("Menu"))
        .unwrap();
    let nav = doc.append(header, ElementSpec::new("nav").class("nav-menu")).unwrap();

    let mut toggles = Vec::new();
    let mut panels = Vec::new();
    let mut panel_links = Vec::new();
    for label in ["Categories", "Regions"] {
        let dropdown = doc.append(nav, ElementSpec::new("div").class("dropdown")).unwrap();
        toggles.push(
            doc.append(dropdown, ElementSpec::new("button").class("dropdown-toggle").text(label))
                .unwrap(),
        );
        let panel = doc.append(dropdown, ElementSpec::new("ul").class("dropdown-menu")).unwrap();
        let entry = doc.append(panel, ElementSpec::new("li")).unwrap();
        panel_links.push(
            doc.append(entry, ElementSpec::new("a").attr("href", "#").text(label))
                .unwrap(),
        );
        panels.push(panel);
    }

    let hero_image = doc
        .append(
            body,
            ElementSpec::new("img")
                .attr("data-src", "/img/hero.jpg")
                .rect(Rect::new(0.0, 80.0, 800.0, 300.0)),
        )
        .unwrap();

    let main = doc.append(body, ElementSpec::new("main").id("main")).unwrap();
    let search_form = doc
        .append(
            main,
            ElementSpec::new("form").id("searchForm").attr("action", "/search"),
        )
        .unwrap();
    let search_input = doc
        .append(search_form, ElementSpec::new("input").id("searchInput").attr("name", "q"))
        .unwrap();

    let name_btn = doc
        .append(main, ElementSpec::new("button").class("sort-btn").attr("data-sort", "name").text("Name"))
        .unwrap();
    let price_btn = doc
        .append(main, ElementSpec::new("button").class("sort-btn").attr("data-sort", "price").text("Price"))
        .unwrap();
    let filter = doc.append(main, ElementSpec::new("input").class("filter-input")).unwrap();

    let grid = doc.append(main, ElementSpec::new("div").class("results-grid")).unwrap();
    let mut item_ids = Vec::new();
    for (text, name, price) in items {
        let mut spec = ElementSpec::new("div").class("filterable-item").text(text);
        if let Some(name) = name {
            spec = spec.attr("data-name", name);
        }
        if let Some(price) = price {
            spec = spec.attr("data-price", price);
        }
        item_ids.push(doc.append(grid, spec).unwrap());
    }

    let banner = doc
        .append(
            main,
            ElementSpec::new("section")
                .class("fade-in")
                .rect(Rect::new(0.0, 1_200.0, 800.0, 200.0)),
        )
        .unwrap();

    let contact = doc
        .append(
            main,
            ElementSpec::new("form").attr("data-validate", "").attr("action", "/contact"),
        )
        .unwrap();
    let email = doc
        .append(
            contact,
            ElementSpec::new("input")
                .attr("name", "email")
                .attr("required", "")
                .attr("data-label", "Email"),
        )
        .unwrap();
    doc.append(contact, ElementSpec::new("button").text("Send")).unwrap();

    let footer_image = doc
        .append(
            body,
            ElementSpec::new("img")
                .attr("data-src", "/img/footer.jpg")
                .rect(Rect::new(0.0, 3_000.0, 800.0, 200.0)),
        )
        .unwrap();

    let state = initialize(&Config::default(), doc).with_viewport(VIEWPORT);
    let runtime = PageRuntime::new(state, RecordingBackend::default());

    Page {
        runtime,
        mobile_btn,
        nav,
        toggles,
        panels,
        panel_links,
        search_input,
        name_btn,
        price_btn,
        filter,
        grid,
        items: item_ids,
        hero_image,
        footer_image,
        banner,
        contact,
        email,
        main,
    }
}
