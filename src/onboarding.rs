//! First-run welcome tour, shown once and then suppressed by the
//! `onboarded` preference.

pub struct Page {
    pub headline: &'static str,
    pub caption: &'static str,
}

pub const PAGES: [Page; 3] = [
    Page {
        headline: "Find Your Next Favorite Meal",
        caption: "Discover thousands of curated recipes and organize your cooking journey with ease.",
    },
    Page {
        headline: "Effortlessly Save Recipes",
        caption: "Save interesting recipes from anywhere with just one tap.",
    },
    Page {
        headline: "You're All Set!",
        caption: "Your culinary adventure begins now. Find, create, and save recipes you'll love.",
    },
];

/// Renders the tour as plain text.
pub fn render() -> String {
    let mut out = String::from("Welcome to Recipe Book!\n");
    for page in &PAGES {
        out.push_str(&format!("\n  {}\n  {}\n", page.headline, page.caption));
    }
    out.push_str("\nRun `recipebook add --help` to create your first recipe.\n");
    out
}
