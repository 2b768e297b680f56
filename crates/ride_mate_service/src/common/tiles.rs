/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use super::{
    projection::{world_pixel, TILE_SIZE},
    types::*,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileRef {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TilePlacement {
    pub tile: TileRef,
    /// Top-left corner of the tile relative to the viewport center.
    pub offset: PixelPoint,
}

/// Latitude where the square Web Mercator world ends.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Tiles covering `viewport` around `center`, plus one tile of margin on every side.
///
/// Indices outside `[0, 2^zoom)` are dropped, there is no wraparound at the antimeridian.
/// A center beyond the Mercator range (the poles) is pinned to the world edge.
pub fn visible_tiles(center: &Point, zoom: Zoom, viewport: Viewport) -> Vec<TilePlacement> {
    let tile_size = TILE_SIZE as f64;
    let tiles_per_axis = 2i64.pow(zoom.0 as u32);
    let world_extent = tile_size * tiles_per_axis as f64;
    let Latitude(lat) = center.lat;
    let Longitude(lon) = center.lon;
    let world_center = world_pixel(
        &Point::new(lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT), lon),
        zoom,
    );
    let world_center = PixelPoint {
        x: world_center.x.clamp(0.0, world_extent),
        y: world_center.y.clamp(0.0, world_extent),
    };

    let half_width = viewport.width as f64 / 2.0;
    let half_height = viewport.height as f64 / 2.0;

    let tile_index = |pixel: f64| (pixel / tile_size).floor() as i64;
    let in_world = |index: i64| index.clamp(0, tiles_per_axis - 1);

    let first_x = in_world(tile_index(world_center.x - half_width).saturating_sub(1));
    let last_x = in_world(tile_index(world_center.x + half_width).saturating_add(1));
    let first_y = in_world(tile_index(world_center.y - half_height).saturating_sub(1));
    let last_y = in_world(tile_index(world_center.y + half_height).saturating_add(1));

    (first_x..=last_x)
        .flat_map(|x| {
            (first_y..=last_y).map(move |y| TilePlacement {
                tile: TileRef {
                    x: x as u32,
                    y: y as u32,
                    zoom: zoom.0,
                },
                offset: PixelPoint {
                    x: x as f64 * tile_size - world_center.x,
                    y: y as f64 * tile_size - world_center.y,
                },
            })
        })
        .collect()
}

/// Fills `{z}`, `{x}` and `{y}` in a raster tile url template.
pub fn tile_url(template: &str, tile: &TileRef) -> String {
    template
        .replace("{z}", &tile.zoom.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_cover_viewport_with_margin() {
        let center = Point::new(12.9716, 77.5946);
        let viewport = Viewport {
            width: 800,
            height: 600,
        };
        let tiles = visible_tiles(&center, Zoom(13), viewport);

        let min_x = tiles.iter().map(|t| t.offset.x).fold(f64::MAX, f64::min);
        let max_x = tiles.iter().map(|t| t.offset.x).fold(f64::MIN, f64::max);
        let min_y = tiles.iter().map(|t| t.offset.y).fold(f64::MAX, f64::min);
        let max_y = tiles.iter().map(|t| t.offset.y).fold(f64::MIN, f64::max);

        assert!(min_x <= -400.0 - 256.0);
        assert!(max_x + 256.0 >= 400.0 + 256.0);
        assert!(min_y <= -300.0 - 256.0);
        assert!(max_y + 256.0 >= 300.0 + 256.0);
    }

    #[test]
    fn test_grid_is_rectangular_and_unique() {
        let center = Point::new(12.9716, 77.5946);
        let viewport = Viewport {
            width: 800,
            height: 600,
        };
        let tiles = visible_tiles(&center, Zoom(13), viewport);

        let xs: std::collections::BTreeSet<u32> = tiles.iter().map(|t| t.tile.x).collect();
        let ys: std::collections::BTreeSet<u32> = tiles.iter().map(|t| t.tile.y).collect();
        assert_eq!(tiles.len(), xs.len() * ys.len());
        assert!(tiles.iter().all(|t| t.tile.zoom == 13));
    }

    #[test]
    fn test_out_of_world_tiles_are_excluded() {
        let viewport = Viewport {
            width: 1024,
            height: 1024,
        };
        let tiles = visible_tiles(&Point::new(0.0, 0.0), Zoom(1), viewport);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.tile.x < 2 && t.tile.y < 2));

        let tiles = visible_tiles(&Point::new(0.0, 179.9), Zoom(3), viewport);
        assert!(tiles.iter().all(|t| t.tile.x < 8));
    }

    #[test]
    fn test_poles_stay_inside_the_world() {
        let viewport = Viewport {
            width: 800,
            height: 600,
        };
        let tiles_per_axis = 2u32.pow(13);
        for lat in [90.0, -90.0] {
            let tiles = visible_tiles(&Point::new(lat, 77.5946), Zoom(13), viewport);
            assert!(!tiles.is_empty());
            assert!(tiles
                .iter()
                .all(|t| t.tile.x < tiles_per_axis && t.tile.y < tiles_per_axis));
            assert!(tiles
                .iter()
                .all(|t| t.offset.x.is_finite() && t.offset.y.is_finite()));
        }

        let south = visible_tiles(&Point::new(-90.0, 77.5946), Zoom(13), viewport);
        assert!(south.iter().any(|t| t.tile.y == tiles_per_axis - 1));
        let north = visible_tiles(&Point::new(90.0, 77.5946), Zoom(13), viewport);
        assert!(north.iter().any(|t| t.tile.y == 0));
    }

    #[test]
    fn test_tile_url() {
        let tile = TileRef {
            x: 5861,
            y: 3793,
            zoom: 13,
        };
        assert_eq!(
            tile_url("https://tile.openstreetmap.org/{z}/{x}/{y}.png", &tile),
            "https://tile.openstreetmap.org/13/5861/3793.png"
        );
    }
}
