/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use crate::{
    common::{projection::*, tiles::*, types::*},
    domain::types::ui::map::*,
    environment::{AppState, MapDefaults},
    tools::error::AppError,
};
use actix_web::web::Data;

/// Highest zoom level raster tile servers render.
pub const MAX_ZOOM: u8 = 19;

fn view(defaults: &MapDefaults, query: ViewQuery) -> Result<(Zoom, Viewport), AppError> {
    let zoom = query.zoom.unwrap_or(defaults.zoom.0);
    if zoom > MAX_ZOOM {
        return Err(AppError::InvalidRequest(format!(
            "Zoom {zoom} is above the maximum of {MAX_ZOOM}"
        )));
    }
    let viewport = Viewport {
        width: query.width.unwrap_or(defaults.viewport.width),
        height: query.height.unwrap_or(defaults.viewport.height),
    };
    let max = defaults.max_viewport_px;
    if viewport.width > max || viewport.height > max {
        return Err(AppError::InvalidRequest(format!(
            "Viewport {}x{} exceeds the maximum of {max}px per side",
            viewport.width, viewport.height
        )));
    }
    Ok((Zoom(zoom), viewport))
}

fn tile_views(template: &str, center: &Point, zoom: Zoom, viewport: Viewport) -> Vec<TileView> {
    visible_tiles(center, zoom, viewport)
        .into_iter()
        .map(|TilePlacement { tile, offset }| TileView {
            url: tile_url(template, &tile),
            tile,
            offset,
        })
        .collect()
}

pub async fn project(data: Data<AppState>, request: ProjectRequest) -> Result<PixelPoint, AppError> {
    let (zoom, viewport) = view(&data.map_defaults, request.view)?;
    Ok(to_pixel(&request.point, &request.center, zoom, viewport))
}

pub async fn unproject(data: Data<AppState>, request: UnprojectRequest) -> Result<Point, AppError> {
    let (zoom, viewport) = view(&data.map_defaults, request.view)?;
    Ok(to_coordinate(&request.pixel, &request.center, zoom, viewport))
}

pub async fn tiles(data: Data<AppState>, query: TilesQuery) -> Result<TilesResponse, AppError> {
    let (zoom, viewport) = view(&data.map_defaults, query.view())?;
    let center = Point::new(query.lat, query.lon);
    Ok(TilesResponse {
        tiles: tile_views(&data.map_defaults.tile_url_template, &center, zoom, viewport),
        center,
        zoom,
        viewport,
    })
}

/// Map view centered between pickup and drop, with markers for them and the driver.
pub fn map_view(
    defaults: &MapDefaults,
    pickup: Option<&Point>,
    drop: Option<&Point>,
    driver: Option<&Point>,
    query: ViewQuery,
) -> Result<MapViewResponse, AppError> {
    let (zoom, viewport) = view(defaults, query)?;
    let center = map_center(pickup, drop, &defaults.center);
    let marker = |point: &Point| Marker {
        point: *point,
        pixel: to_pixel(point, &center, zoom, viewport),
    };

    Ok(MapViewResponse {
        tiles: tile_views(&defaults.tile_url_template, &center, zoom, viewport),
        pickup: pickup.map(marker),
        drop: drop.map(marker),
        driver: driver.map(marker),
        center,
        zoom,
        viewport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> MapDefaults {
        MapDefaults {
            tile_url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            zoom: Zoom(13),
            viewport: Viewport {
                width: 800,
                height: 600,
            },
            center: Point::new(12.9716, 77.5946),
            max_viewport_px: 4096,
        }
    }

    #[test]
    fn test_empty_map_centers_on_default() {
        let response = map_view(&defaults(), None, None, None, ViewQuery::default())
            .expect("map view");
        assert_eq!(response.center, Point::new(12.9716, 77.5946));
        assert_eq!(response.zoom, Zoom(13));
        assert!(response.pickup.is_none());
        assert!(!response.tiles.is_empty());
        assert!(response.tiles.iter().all(|tile| tile.url.starts_with("https://tile.openstreetmap.org/13/")));
    }

    #[test]
    fn test_markers_straddle_the_midpoint() {
        let pickup = Point::new(12.9352, 77.6245);
        let drop = Point::new(12.9719, 77.6412);
        let response = map_view(&defaults(), Some(&pickup), Some(&drop), None, ViewQuery::default())
            .expect("map view");

        let pickup_marker = response.pickup.expect("pickup marker");
        let drop_marker = response.drop.expect("drop marker");
        assert!((pickup_marker.pixel.x + drop_marker.pixel.x - 800.0).abs() < 1e-6);
        assert!(pickup_marker.pixel.y > drop_marker.pixel.y);
    }

    #[test]
    fn test_zoom_above_tile_range_is_rejected() {
        let query = ViewQuery {
            zoom: Some(MAX_ZOOM + 1),
            ..ViewQuery::default()
        };
        assert!(matches!(
            map_view(&defaults(), None, None, None, query),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_viewport_above_limit_is_rejected() {
        let query = ViewQuery {
            width: Some(u32::MAX),
            height: Some(u32::MAX),
            ..ViewQuery::default()
        };
        assert!(matches!(
            map_view(&defaults(), None, None, None, query),
            Err(AppError::InvalidRequest(_))
        ));

        let query = ViewQuery {
            width: Some(4097),
            ..ViewQuery::default()
        };
        assert!(matches!(
            map_view(&defaults(), None, None, None, query),
            Err(AppError::InvalidRequest(_))
        ));

        let query = ViewQuery {
            width: Some(4096),
            height: Some(4096),
            ..ViewQuery::default()
        };
        assert!(map_view(&defaults(), None, None, None, query).is_ok());
    }
}
