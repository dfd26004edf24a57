use crate::device::DeviceRecord;

/// Drops duplicate views of the same disk and records without a capacity.
///
/// Duplicates are found by serial among interfaces that have a
/// [`dedup_priority`](crate::device::Interface::dedup_priority). Every
/// lower-ranked record sharing a serial with a higher-ranked one is removed,
/// and the survivor takes the first removed record's name as its alias.
/// Records of equal rank never remove each other. Records without a serial
/// never match.
///
/// Any record still present after deduplication that has no capacity is
/// removable or optical media and is dropped as well. Survivors keep their
/// input order.
pub fn reconcile(devices: Vec<DeviceRecord>) -> Vec<DeviceRecord> {
    let removal = removal_mask(&devices);
    let aliases = duplicate_aliases(&devices);

    devices
        .into_iter()
        .zip(removal)
        .zip(aliases)
        .filter(|((_, removed), _)| !removed)
        .map(|((mut device, _), alias)| {
            if device.alias_name.is_none() {
                device.alias_name = alias;
            }
            device
        })
        .collect()
}

/// Marks every index that reconciliation removes.
pub fn removal_mask(devices: &[DeviceRecord]) -> Vec<bool> {
    let mut removed = vec![false; devices.len()];

    for index in 0..devices.len() {
        for other_index in shadowed_by(devices, index) {
            removed[other_index] = true;
        }
    }

    for (index, device) in devices.iter().enumerate() {
        if !removed[index] && device.capacity.is_none() {
            removed[index] = true;
        }
    }

    removed
}

fn duplicate_aliases(devices: &[DeviceRecord]) -> Vec<Option<String>> {
    (0..devices.len())
        .map(|index| {
            shadowed_by(devices, index)
                .next()
                .map(|other_index| devices[other_index].name.clone())
        })
        .collect()
}

/// Indices of records that `devices[index]` outranks with the same serial.
fn shadowed_by(devices: &[DeviceRecord], index: usize) -> impl Iterator<Item = usize> + '_ {
    let device = &devices[index];
    let rank = device.interface.dedup_priority();
    let serial = device.serial.as_deref();

    devices
        .iter()
        .enumerate()
        .filter(move |(other_index, other)| {
            let (Some(rank), Some(serial)) = (rank, serial) else {
                return false;
            };
            *other_index != index
                && other.serial.as_deref() == Some(serial)
                && other
                    .interface
                    .dedup_priority()
                    .is_some_and(|other_rank| other_rank < rank)
        })
        .map(|(other_index, _)| other_index)
}
