use crate::models::Container;

/// Column geometry of a set of settled containers: the distinct left
/// edges in ascending order, plus per-column lookups.
#[derive(Debug)]
pub struct Corners<'a> {
    containers: &'a [Container],
    pub xs: Vec<i32>,
    pub left: i32,
}

impl<'a> Corners<'a> {
    pub fn new(containers: &'a [Container]) -> Self {
        let mut xs: Vec<i32> = containers.iter().map(|c| c.rect.x).collect();
        xs.sort_unstable();
        xs.dedup();
        let left = xs.first().copied().unwrap_or(0);
        Self {
            containers,
            xs,
            left,
        }
    }

    /// The visually lowest container of the column starting at `column_x`.
    pub fn bottom_of_column(&self, column_x: i32) -> Option<&Container> {
        self.containers
            .iter()
            .filter(|c| c.rect.x == column_x)
            .max_by_key(|c| c.rect.y)
    }

    /// Number of containers whose left edge sits at `column_x`.
    pub fn column_len(&self, column_x: i32) -> usize {
        self.containers
            .iter()
            .filter(|c| c.rect.x == column_x)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rect;

    fn container(id: i64, x: i32, y: i32, width: i32, height: i32) -> Container {
        Container {
            id,
            window: Some(id as u64),
            rect: Rect {
                x,
                y,
                width,
                height,
            },
            geometry: Rect::default(),
            marks: vec![],
        }
    }

    #[test]
    fn column_edges_are_sorted_and_deduplicated() {
        let containers = vec![
            container(1, 600, 0, 600, 400),
            container(2, 0, 0, 600, 800),
            container(3, 600, 400, 600, 400),
        ];
        let corners = Corners::new(&containers);
        assert_eq!(corners.xs, vec![0, 600]);
        assert_eq!(corners.left, 0);
    }

    #[test]
    fn bottom_of_column_scans_for_max_y() {
        let containers = vec![
            container(1, 0, 0, 600, 400),
            container(2, 0, 400, 600, 400),
            container(3, 600, 0, 600, 800),
        ];
        let corners = Corners::new(&containers);
        assert_eq!(corners.bottom_of_column(0).map(|c| c.id), Some(2));
        assert_eq!(corners.column_len(0), 2);
        assert_eq!(corners.column_len(600), 1);
    }
}
