//! Import of Agisoft Metashape camera exports.
//!
//! Metashape writes one `<camera>` element per photo, anywhere below the
//! document root, with the world-to-camera transform as the text of a
//! `<transform>` child:
//!
//! ```xml
//! <document>
//!   <chunk>
//!     <cameras>
//!       <camera id="0" sensor_id="0" label="IMG_0001">
//!         <transform>1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1</transform>
//!       </camera>
//!     </cameras>
//!   </chunk>
//! </document>
//! ```

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Result;
use crate::record::CameraRecord;

/// A `<camera>` element whose end tag has not been reached yet.
struct OpenCamera {
    depth: usize,
    id: Option<String>,
    label: Option<String>,
    transform: Option<String>,
}

/// Extracts every usable camera from a Metashape XML document.
///
/// Cameras with `enabled="false"` are skipped silently. Cameras without a
/// `<transform>`, without a numeric `id`, or with an unparsable transform are
/// skipped with a warning. A missing `label` defaults to `Camera_{id}`.
///
/// Fails only if the document itself is not well-formed XML.
pub fn parse_cameras(xml: &str) -> Result<Vec<CameraRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut cameras = Vec::new();
    let mut depth = 0_usize;
    let mut open: Option<OpenCamera> = None;
    let mut in_transform = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                depth += 1;
                match element.name().as_ref() {
                    b"camera" => open = open_camera(&element, depth)?,
                    b"transform" => {
                        in_transform = open.as_ref().is_some_and(|c| depth == c.depth + 1);
                    }
                    _ => {}
                }
            }
            Event::Empty(element) => {
                if element.name().as_ref() == b"camera" {
                    if let Some(camera) = open_camera(&element, depth + 1)? {
                        cameras.extend(close_camera(camera));
                    }
                }
            }
            Event::Text(text) => {
                if in_transform {
                    if let Some(camera) = open.as_mut() {
                        let text = text.unescape().map_err(quick_xml::Error::from)?;
                        camera.transform = Some(text.into_owned());
                    }
                }
            }
            Event::End(element) => {
                match element.name().as_ref() {
                    b"transform" => in_transform = false,
                    b"camera" => {
                        if open.as_ref().is_some_and(|c| c.depth == depth) {
                            if let Some(camera) = open.take() {
                                cameras.extend(close_camera(camera));
                            }
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(cameras)
}

fn open_camera(element: &BytesStart<'_>, depth: usize) -> Result<Option<OpenCamera>> {
    let id = attribute(element, "id")?;
    if attribute(element, "enabled")?.as_deref() == Some("false") {
        log::debug!("skipping disabled camera {}", id.as_deref().unwrap_or("?"));
        return Ok(None);
    }

    Ok(Some(OpenCamera {
        depth,
        id,
        label: attribute(element, "label")?,
        transform: None,
    }))
}

fn close_camera(camera: OpenCamera) -> Option<CameraRecord> {
    let name = camera.id.as_deref().unwrap_or("?");
    let Some(transform) = camera.transform.as_deref() else {
        log::warn!("camera {name} has no transform, skipping");
        return None;
    };

    let Some(id) = camera.id.as_deref().and_then(|id| id.trim().parse::<i64>().ok()) else {
        log::warn!("camera {name} has no numeric id, skipping");
        return None;
    };
    let label = camera.label.unwrap_or_else(|| format!("Camera_{id}"));

    match CameraRecord::from_agisoft_transform(transform) {
        Ok(record) => Some(record.with_id(id).with_label(label)),
        Err(err) => {
            log::warn!("camera {id} ({label}): {err}, skipping");
            None
        }
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    let Some(attribute) = element
        .try_get_attribute(name)
        .map_err(quick_xml::Error::from)?
    else {
        return Ok(None);
    };
    let value = attribute
        .unescape_value()
        .map_err(quick_xml::Error::from)?;
    Ok(Some(value.into_owned()))
}
