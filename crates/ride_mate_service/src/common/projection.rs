/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Spherical Web-Mercator projection between coordinates and viewport pixels.
//!
//! The world bitmap at zoom `z` is `256 * 2^z` pixels square. Longitude maps linearly
//! onto x; latitude is stretched by `ln(tan φ + sec φ)`. Behaviour at the poles is
//! undefined and deliberately left unguarded.

use super::types::*;
use std::f64::consts::PI;

pub const TILE_SIZE: u32 = 256;

/// Width (and height) of the whole world in pixels at `zoom`.
pub fn world_size(Zoom(zoom): Zoom) -> f64 {
    TILE_SIZE as f64 * 2f64.powi(zoom as i32)
}

/// Position of `point` on the world bitmap at `zoom`.
pub fn world_pixel(point: &Point, zoom: Zoom) -> PixelPoint {
    let scale = world_size(zoom);
    let Latitude(lat) = point.lat;
    let Longitude(lon) = point.lon;

    let lat_rad = lat.to_radians();
    let x = (lon + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * scale;

    PixelPoint { x, y }
}

fn world_to_point(world: PixelPoint, zoom: Zoom) -> Point {
    let scale = world_size(zoom);
    let lon = world.x / scale * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * world.y / scale)).sinh().atan().to_degrees();
    Point::new(lat, lon)
}

/// Projects `point` onto a viewport of `viewport` size whose center shows `center`.
pub fn to_pixel(point: &Point, center: &Point, zoom: Zoom, viewport: Viewport) -> PixelPoint {
    let world = world_pixel(point, zoom);
    let world_center = world_pixel(center, zoom);

    PixelPoint {
        x: viewport.width as f64 / 2.0 + (world.x - world_center.x),
        y: viewport.height as f64 / 2.0 + (world.y - world_center.y),
    }
}

/// Inverse of [`to_pixel`].
pub fn to_coordinate(pixel: &PixelPoint, center: &Point, zoom: Zoom, viewport: Viewport) -> Point {
    let world_center = world_pixel(center, zoom);

    let world = PixelPoint {
        x: world_center.x + (pixel.x - viewport.width as f64 / 2.0),
        y: world_center.y + (pixel.y - viewport.height as f64 / 2.0),
    };

    world_to_point(world, zoom)
}

/// Center of the map screen: midpoint of pickup and drop, the pickup alone, or `default`.
pub fn map_center(pickup: Option<&Point>, drop: Option<&Point>, default: &Point) -> Point {
    match (pickup, drop) {
        (Some(pickup), Some(drop)) => Point::new(
            (pickup.lat.0 + drop.lat.0) / 2.0,
            (pickup.lon.0 + drop.lon.0) / 2.0,
        ),
        (Some(pickup), None) => *pickup,
        _ => *default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    #[test]
    fn test_center_projects_to_viewport_middle() {
        let center = Point::new(12.9716, 77.5946);
        let pixel = to_pixel(&center, &center, Zoom(13), VIEWPORT);
        assert!((pixel.x - 400.0).abs() < 1e-9);
        assert!((pixel.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let center = Point::new(12.9716, 77.5946);
        for zoom in [0u8, 5, 13, 18] {
            let mut lat = -80.0;
            while lat <= 80.0 {
                let mut lon = -179.0;
                while lon <= 179.0 {
                    let point = Point::new(lat, lon);
                    let pixel = to_pixel(&point, &center, Zoom(zoom), VIEWPORT);
                    let back = to_coordinate(&pixel, &center, Zoom(zoom), VIEWPORT);
                    assert!((back.lat.0 - lat).abs() < 1e-6, "lat {lat} zoom {zoom}");
                    assert!((back.lon.0 - lon).abs() < 1e-6, "lon {lon} zoom {zoom}");
                    lon += 17.9;
                }
                lat += 7.3;
            }
        }
    }

    #[test]
    fn test_north_is_up_and_east_is_right() {
        let center = Point::new(12.9716, 77.5946);
        let north_east = Point::new(13.0, 77.6);
        let pixel = to_pixel(&north_east, &center, Zoom(13), VIEWPORT);
        assert!(pixel.x > 400.0);
        assert!(pixel.y < 300.0);
    }

    #[test]
    fn test_world_pixel_at_origin() {
        let pixel = world_pixel(&Point::new(0.0, 0.0), Zoom(0));
        assert!((pixel.x - 128.0).abs() < 1e-9);
        assert!((pixel.y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_map_center() {
        let default = Point::new(12.9716, 77.5946);
        let pickup = Point::new(12.0, 77.0);
        let drop = Point::new(13.0, 78.0);
        assert_eq!(map_center(None, None, &default), default);
        assert_eq!(map_center(Some(&pickup), None, &default), pickup);
        assert_eq!(map_center(None, Some(&drop), &default), default);
        assert_eq!(
            map_center(Some(&pickup), Some(&drop), &default),
            Point::new(12.5, 77.5)
        );
    }
}
