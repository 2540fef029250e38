//! Popup markup and marker icons.

use ssm_schools::{Coordinates, School, Status};

const ICON_BASE_URL: &str = "https://maps.google.com/mapfiles/ms/icons";

/// The fixed marker icon for a status.
pub fn status_icon_url(status: Status) -> String {
    let color = match status {
        Status::Defined => "green",
        Status::Pending => "yellow",
        Status::NoService => "red",
    };
    format!("{}/{}-dot.png", ICON_BASE_URL, color)
}

/// Google Maps directions to the given position.
pub fn directions_url(coordinates: &Coordinates) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        coordinates.lat, coordinates.lng
    )
}

/// Popup body for a school marker.
pub fn render_popup(school: &School) -> String {
    format!(
        concat!(
            r#"<div class="school-popup">"#,
            r#"<h3>{name}</h3>"#,
            r#"<p><strong>Designation:</strong> {designation}</p>"#,
            r#"<p><strong>District:</strong> {district}</p>"#,
            r#"<p><strong>Address:</strong> {address}</p>"#,
            r#"<p><strong>Status:</strong> <span class="status-{status_class}">{status}</span></p>"#,
            r#"<a href="{directions}" target="_blank" rel="noopener noreferrer">Get directions</a>"#,
            r#"</div>"#
        ),
        name = escape_html(&school.name),
        designation = escape_html(&school.designation),
        district = escape_html(&school.district),
        address = escape_html(&school.address),
        status_class = status_css_class(school.status),
        status = school.status.label(),
        directions = escape_html(&directions_url(&school.coordinates)),
    )
}

pub fn status_css_class(status: Status) -> &'static str {
    match status {
        Status::Defined => "defined",
        Status::Pending => "pending",
        Status::NoService => "no-service",
    }
}

/// Escape text for HTML element and attribute content.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school() -> School {
        School {
            id: "40.585--73.968-0".to_string(),
            name: "Lincoln High School".to_string(),
            address: "2800 Ocean Pkwy, Brooklyn, NY 11235".to_string(),
            coordinates: Coordinates::new(40.585, -73.968),
            status: Status::Pending,
            designation: "Public".to_string(),
            district: "District 21".to_string(),
        }
    }

    #[test]
    fn popup_lists_every_field() {
        let html = render_popup(&school());
        assert!(html.contains("<h3>Lincoln High School</h3>"));
        assert!(html.contains("Public"));
        assert!(html.contains("District 21"));
        assert!(html.contains("2800 Ocean Pkwy, Brooklyn, NY 11235"));
        assert!(html.contains(r#"<span class="status-pending">Pending</span>"#));
    }

    #[test]
    fn popup_links_to_directions() {
        let html = render_popup(&school());
        assert!(html.contains(
            "https://www.google.com/maps/dir/?api=1&amp;destination=40.585,-73.968"
        ));
    }

    #[test]
    fn popup_escapes_markup_in_names() {
        let mut s = school();
        s.name = "<script>alert('x')</script> & Co".to_string();
        let html = render_popup(&s);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; Co"));
    }

    #[test]
    fn each_status_has_its_own_icon() {
        assert!(status_icon_url(Status::Defined).ends_with("/green-dot.png"));
        assert!(status_icon_url(Status::Pending).ends_with("/yellow-dot.png"));
        assert!(status_icon_url(Status::NoService).ends_with("/red-dot.png"));
    }

    #[test]
    fn directions_url_uses_raw_coordinates() {
        assert_eq!(
            directions_url(&Coordinates::new(1.5, -2.25)),
            "https://www.google.com/maps/dir/?api=1&destination=1.5,-2.25"
        );
    }
}
