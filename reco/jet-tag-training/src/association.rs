//! Association of tag-info collections and flavour matches per jet.

use std::collections::BTreeMap;

use crate::event::{FlavourMatch, Jet, JetKey, TagInfo};

/// Everything known about one jet after association.
#[derive(Debug, Clone, PartialEq)]
pub struct JetInfo {
    /// The jet, as seen by the first collection that mentions it.
    pub jet: Jet,
    /// Matched truth flavour, 0 when unmatched.
    pub flavour: i32,
    /// Position of the jet's tag info in each input collection.
    pub tag_infos: Vec<Option<usize>>,
}

/// Groups tag infos from several collections by jet.
///
/// For collection `i`, the entry at position `j` sets `tag_infos[i] = Some(j)`
/// on its jet's [`JetInfo`]. Slots of collections that do not mention a jet
/// stay `None`. Flavour matches for jets present in the map set their
/// flavour; other matches are ignored. The result is ordered by [`JetKey`].
///
/// # Example
///
/// ```
/// use jet_tag_training::{associate, FlavourMatch, Jet, TagInfo};
///
/// let ip = vec![TagInfo::new(Jet::new(1, 20.0, 0.1), vec![]), TagInfo::new(Jet::new(2, 40.0, 1.1), vec![])];
/// let sv = vec![TagInfo::new(Jet::new(2, 40.0, 1.1), vec![])];
///
/// let infos = associate(&[ip, sv], &[FlavourMatch::new(2, 5)]);
/// let jet2 = infos.values().nth(1).unwrap();
/// assert_eq!(jet2.tag_infos, vec![Some(1), Some(0)]);
/// assert_eq!(jet2.flavour, 5);
/// ```
#[must_use]
pub fn associate<C: AsRef<[TagInfo]>>(
    collections: &[C],
    matches: &[FlavourMatch],
) -> BTreeMap<JetKey, JetInfo> {
    let n = collections.len();
    let mut infos: BTreeMap<JetKey, JetInfo> = BTreeMap::new();

    for (i, collection) in collections.iter().enumerate() {
        for (j, tag_info) in collection.as_ref().iter().enumerate() {
            let info = infos.entry(tag_info.jet.key).or_insert_with(|| JetInfo {
                jet: tag_info.jet,
                flavour: 0,
                tag_infos: vec![None; n],
            });
            info.tag_infos[i] = Some(j);
        }
    }

    for m in matches {
        if let Some(info) = infos.get_mut(&m.jet) {
            info.flavour = m.flavour;
        }
    }

    infos
}
